#![no_main]

use dllsym_match::{parse_type, TypeNamer};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Parse errors are expected for malformed input
    if let Ok(ty) = parse_type(text) {
        let _ = ty.to_string();
        let _ = TypeNamer::native().render(&ty);
    }
});
