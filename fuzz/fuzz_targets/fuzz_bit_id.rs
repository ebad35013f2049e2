#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing must never panic; a parsed id must render back to itself
        if let Ok(id) = bitpm::BitId::parse(input) {
            let reparsed = bitpm::BitId::parse(&id.to_string()).unwrap();
            assert_eq!(reparsed, id);
        }
        let _ = bitpm::BitId::parse_plugin(input);
    }
});
