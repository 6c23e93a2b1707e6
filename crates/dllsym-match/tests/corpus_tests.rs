//! Demangled-text corpus tests.
//!
//! Strings below are what `undname` prints for symbols exported by small
//! MSVC test libraries.

use dllsym_match::{
    arg_list_len, is_constructor_with_name, is_destructor_with_name, is_variable_with_name,
    Bitness, Const, CppType, Volatile, EntityQuery, SymbolCatalog, TypeDesc, TypeNamer,
};
use pretty_assertions::assert_eq;

fn ty(s: &str) -> TypeDesc {
    s.parse().unwrap()
}

// =============================================================================
// Destructors
// =============================================================================

#[test]
fn destructor_cdecl_variants() {
    let namer = TypeNamer::new(Bitness::Bits64);
    for text in [
        "public: __cdecl foo::~foo(void)",
        "private: __cdecl foo::~foo(void)",
        "protected: __cdecl foo::~foo(void)",
        "public: virtual __cdecl foo::~foo(void)",
        "private: virtual __cdecl foo::~foo(void)",
        "protected: virtual __cdecl foo::~foo(void)",
        "public: __cdecl foo::~foo(void) __ptr64",
        "private: __cdecl foo::~foo(void) __ptr64",
        "protected: __cdecl foo::~foo(void) __ptr64",
    ] {
        assert!(is_destructor_with_name(&namer, "foo::~foo(void)", text), "{}", text);
    }
    assert!(is_destructor_with_name(
        &namer,
        "some_space::some_father::~some_father(void)",
        "public: __cdecl some_space::some_father::~some_father(void) __ptr64"
    ));
}

#[test]
fn destructor_thiscall_variants() {
    let namer = TypeNamer::new(Bitness::Bits32);
    for text in [
        "public: __thiscall foo::~foo(void)",
        "private: __thiscall foo::~foo(void)",
        "protected: __thiscall foo::~foo(void)",
        "public: virtual __thiscall foo::~foo(void)",
        "private: virtual __thiscall foo::~foo(void)",
        "protected: virtual __thiscall foo::~foo(void)",
        "public: __thiscall foo::~foo(void) __ptr32",
        "private: __thiscall foo::~foo(void) __ptr32",
        "protected: __thiscall foo::~foo(void)  __ptr32",
    ] {
        assert!(is_destructor_with_name(&namer, "foo::~foo(void)", text), "{}", text);
    }
    assert!(is_destructor_with_name(
        &namer,
        "some_space::some_father::~some_father(void)",
        "public: __thiscall some_space::some_father::~some_father(void) __ptr64"
    ));
}

// =============================================================================
// Argument lists
// =============================================================================

#[test]
fn arg_list_consumed_lengths() {
    let namer = TypeNamer::native();
    assert_eq!(arg_list_len(&namer, "int", &[ty("int")]), Some(3));
    assert_eq!(arg_list_len(&namer, "void", &[]), Some(4));
    assert_eq!(arg_list_len(&namer, "int,int", &[ty("int"), ty("int")]), Some(7));
    assert_eq!(
        arg_list_len(
            &namer,
            "int,short,long",
            &[ty("int"), ty("short"), ty("long")]
        ),
        Some(14)
    );
}

// =============================================================================
// Constructors and variables
// =============================================================================

#[test]
fn constructor_scenarios() {
    let namer = TypeNamer::native();
    let ctor = "some_space::some_class::some_class";
    assert!(is_constructor_with_name(
        &namer,
        ctor,
        &[],
        "public: __cdecl some_space::some_class::some_class(void) __ptr64"
    ));
    assert!(is_constructor_with_name(
        &namer,
        ctor,
        &[ty("int")],
        "private: __cdecl some_space::some_class::some_class(int)"
    ));
    assert!(is_constructor_with_name(
        &namer,
        ctor,
        &[ty("int"), ty("int")],
        "private: __cdecl some_space::some_class::some_class(int,int)"
    ));
}

#[test]
fn variable_scenarios() {
    let namer = TypeNamer::native();
    let int = i32::type_desc();
    assert!(is_variable_with_name(
        &namer,
        "some_space::some_class::value",
        &int,
        "public: static int some_space::some_class::value"
    ));
    assert!(is_variable_with_name(
        &namer,
        "some_space::some_class::value",
        &int,
        "int some_space::some_class::value"
    ));
    assert!(!is_variable_with_name(
        &namer,
        "some_space::variable",
        &f64::type_desc(),
        "public: static int some_space::variable"
    ));
    assert!(is_variable_with_name(
        &namer,
        "unscoped_c_var",
        &<Const<f64>>::type_desc(),
        "double const unscoped_c_var"
    ));
}

// =============================================================================
// Catalog lookups over a realistic export table
// =============================================================================

struct SomeFather;
struct SomeClass;

impl CppType for SomeFather {
    fn type_desc() -> TypeDesc {
        TypeDesc::named("class some_space::some_father")
    }
}

impl CppType for SomeClass {
    fn type_desc() -> TypeDesc {
        TypeDesc::named("struct some_space::some_class")
    }
}

fn library_exports() -> SymbolCatalog {
    SymbolCatalog::new(
        Bitness::Bits64,
        [
            (
                "??0some_father@some_space@@QEAA@XZ",
                "public: __cdecl some_space::some_father::some_father(void) __ptr64",
            ),
            (
                "??1some_father@some_space@@UEAA@XZ",
                "public: virtual __cdecl some_space::some_father::~some_father(void) __ptr64",
            ),
            (
                "??_7some_father@some_space@@6B@",
                "const some_space::some_father::`vftable'",
            ),
            (
                "??0some_class@some_space@@QEAA@H@Z",
                "public: __cdecl some_space::some_class::some_class(int) __ptr64",
            ),
            (
                "??0some_class@some_space@@QEAA@AEBU01@@Z",
                "public: __cdecl some_space::some_class::some_class(struct some_space::some_class const & __ptr64) __ptr64",
            ),
            (
                "?value@some_class@some_space@@2HA",
                "public: static int some_space::some_class::value",
            ),
            (
                "?set_value@some_class@some_space@@QEAAXH@Z",
                "public: void __cdecl some_space::some_class::set_value(int) __ptr64",
            ),
            (
                "?get@some_class@some_space@@QEBAHXZ",
                "public: int __cdecl some_space::some_class::get(void)const __ptr64",
            ),
            (
                "?poll@some_class@some_space@@QECAHXZ",
                "public: int __cdecl some_space::some_class::poll(void)volatile __ptr64",
            ),
            (
                "?peek@some_class@some_space@@QEDAHXZ",
                "public: int __cdecl some_space::some_class::peek(void)const volatile __ptr64",
            ),
            (
                "?func@some_class@some_space@@SAHHH@Z",
                "public: static int __cdecl some_space::some_class::func(int,int)",
            ),
            (
                "?scale@some_space@@YANNAEAN@Z",
                "double __cdecl some_space::scale(double,double & __ptr64)",
            ),
            ("?unscoped_var@@3HA", "int unscoped_var"),
            ("?unscoped_c_var@@3NB", "double const unscoped_c_var"),
            ("say_hello", "say_hello"),
        ],
    )
}

#[test]
fn catalog_resolves_each_kind() {
    let catalog = library_exports();

    assert_eq!(
        catalog.get_constructor::<SomeFather, fn()>(),
        Some("??0some_father@some_space@@QEAA@XZ")
    );
    assert_eq!(
        catalog.get_destructor::<SomeFather>(),
        Some("??1some_father@some_space@@UEAA@XZ")
    );
    assert_eq!(
        catalog.get_vtable::<SomeFather>(),
        Some("??_7some_father@some_space@@6B@")
    );
    assert_eq!(
        catalog.get_constructor::<SomeClass, fn(i32)>(),
        Some("??0some_class@some_space@@QEAA@H@Z")
    );
    assert_eq!(
        catalog.get_constructor::<SomeClass, fn(&'static SomeClass)>(),
        Some("??0some_class@some_space@@QEAA@AEBU01@@Z")
    );
    assert_eq!(
        catalog.get_variable::<i32>("some_space::some_class::value"),
        Some("?value@some_class@some_space@@2HA")
    );
    assert_eq!(
        catalog.get_member_function::<SomeClass, fn(i32)>("set_value"),
        Some("?set_value@some_class@some_space@@QEAAXH@Z")
    );
    assert_eq!(
        catalog.get_member_function::<Const<SomeClass>, fn() -> i32>("get"),
        Some("?get@some_class@some_space@@QEBAHXZ")
    );
    assert_eq!(
        catalog.get_member_function::<Volatile<SomeClass>, fn() -> i32>("poll"),
        Some("?poll@some_class@some_space@@QECAHXZ")
    );
    assert_eq!(
        catalog.get_member_function::<Const<Volatile<SomeClass>>, fn() -> i32>("peek"),
        Some("?peek@some_class@some_space@@QEDAHXZ")
    );
    assert_eq!(
        catalog.get_function::<fn(i32, i32) -> i32>("some_space::some_class::func"),
        Some("?func@some_class@some_space@@SAHHH@Z")
    );
    assert_eq!(
        catalog.get_function::<fn(f64, &'static mut f64) -> f64>("some_space::scale"),
        Some("?scale@some_space@@YANNAEAN@Z")
    );
    assert_eq!(catalog.get_variable::<i32>("unscoped_var"), Some("?unscoped_var@@3HA"));
    assert_eq!(
        catalog.get_variable::<Const<f64>>("unscoped_c_var"),
        Some("?unscoped_c_var@@3NB")
    );
    assert_eq!(catalog.get_function::<fn()>("say_hello"), Some("say_hello"));
}

#[test]
fn catalog_misses_are_none() {
    let catalog = library_exports();
    assert_eq!(catalog.get_constructor::<SomeClass, fn(i32, i32)>(), None);
    assert_eq!(catalog.get_member_function::<SomeClass, fn() -> i32>("get"), None);
    assert_eq!(catalog.get_member_function::<Const<SomeClass>, fn() -> i32>("poll"), None);
    assert_eq!(catalog.get_member_function::<Volatile<SomeClass>, fn() -> i32>("peek"), None);
    assert_eq!(catalog.get_variable::<f64>("unscoped_var"), None);
    assert_eq!(catalog.get_variable::<f64>("unscoped_c_var"), None);
    assert_eq!(catalog.get_vtable::<SomeClass>(), None);
    assert_eq!(catalog.get_destructor::<SomeClass>(), None);
}

#[test]
fn catalog_related_symbols() {
    let catalog = library_exports();
    let related = catalog.get_related::<SomeClass>();
    assert_eq!(related.len(), 8);
    assert!(related.iter().all(|d| d.contains("some_space::some_class")));
    assert_eq!(catalog.get_related::<SomeFather>().len(), 3);
}

#[test]
fn catalog_queries_from_json() {
    let catalog = library_exports();
    let queries: Vec<EntityQuery> = serde_json::from_str(
        r#"[
            {"kind": "destructor", "class": {"base": "class some_space::some_father"}},
            {"kind": "variable", "name": "unscoped_var", "ty": {"base": "int"}},
            {"kind": "vtable", "class": {"base": "some_space::nobody"}}
        ]"#,
    )
    .unwrap();
    let resolved: Vec<Option<&str>> = queries.iter().map(|q| catalog.find(q)).collect();
    assert_eq!(
        resolved,
        vec![
            Some("??1some_father@some_space@@UEAA@XZ"),
            Some("?unscoped_var@@3HA"),
            None,
        ]
    );
}

#[test]
fn catalog_is_shareable_across_threads() {
    let catalog = std::sync::Arc::new(library_exports());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let catalog = std::sync::Arc::clone(&catalog);
            std::thread::spawn(move || catalog.get_destructor::<SomeFather>().map(str::to_string))
        })
        .collect();
    for handle in handles {
        assert_eq!(
            handle.join().unwrap().as_deref(),
            Some("??1some_father@some_space@@UEAA@XZ")
        );
    }
}
