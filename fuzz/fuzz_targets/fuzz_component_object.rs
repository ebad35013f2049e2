#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = std::str::from_utf8(data) {
        // Arbitrary records must be rejected, not panic
        if let Ok(component) = bitpm::Component::from_json(json) {
            let _ = component.to_json();
            let _ = component.id();
            let _ = component.docs();
        }
    }
});
