#![no_main]

use libfuzzer_sys::fuzz_target;
use magicid::{Matcher, Registry};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(registry) = Registry::from_json(json) {
        let matcher = Matcher::new(registry);
        let _ = matcher.identify(data);
    }
});
