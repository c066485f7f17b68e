#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

use husk_submit::domain::entities::PluginInfo;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        if let Ok(plugin) = PluginInfo::parse(content, Path::new("fuzz.job")) {
            // Whatever parses must render and parse again
            let again = PluginInfo::parse(&plugin.render(), Path::new("fuzz.job"));
            assert!(again.is_ok());
        }
    }
});
