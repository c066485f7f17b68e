#![no_main]

use libfuzzer_sys::fuzz_target;

use husk_submit::{extract_scene, DerivationResolver, ResolveRequest};

fuzz_target!(|data: &[u8]| {
    if let Ok(dump) = std::str::from_utf8(data) {
        // Extraction and resolution of any dump must never panic
        let scene = extract_scene(dump, dump);
        let _ = DerivationResolver::new(&scene).resolve(&ResolveRequest::default());
    }
});
