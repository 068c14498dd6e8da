#![no_main]

use libfuzzer_sys::fuzz_target;
use magicid::{FileType, Matcher};
use std::sync::OnceLock;

static MATCHER: OnceLock<Matcher> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let matcher = MATCHER.get_or_init(|| Matcher::with_default_catalogue().unwrap());
    if let Some(found) = matcher.identify(data) {
        let file_type = FileType::from_content_type(found).unwrap();
        assert!(data.starts_with(file_type.magic()));
    }
});
