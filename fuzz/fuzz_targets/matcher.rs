#![no_main]

use dllsym_match::{Bitness, EntityMatcher, EntityQuery, SymbolCatalog, TypeDesc, TypeNamer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let class = TypeDesc::named("class ns::foo");
    let queries = [
        EntityQuery::variable("ns::foo::count", TypeDesc::named("int").with_const().pointer()),
        EntityQuery::function("ns::make", TypeDesc::named("int"), vec![TypeDesc::named("double")]),
        EntityQuery::member_function(class.clone().with_const(), "get", TypeDesc::void(), vec![]),
        EntityQuery::constructor(class.clone(), vec![class.clone().with_const().lvalue_ref()]),
        EntityQuery::destructor(class.clone()),
        EntityQuery::vtable(class.clone()),
        EntityQuery::related(class),
    ];

    // Matching should never panic, whatever the width
    for bitness in [Bitness::Bits32, Bitness::Bits64] {
        let namer = TypeNamer::new(bitness);
        for query in &queries {
            let _ = EntityMatcher::new(query, namer).matches(text);
        }
    }

    // Same through a catalog, one entry per input line
    let catalog = SymbolCatalog::from_entries(text.lines().map(|line| (line, line)));
    for query in &queries {
        let _ = catalog.find(query);
    }
});
