#![no_main]
use libfuzzer_sys::fuzz_target;
use sheetlight::{Dialect, parse_with};

// Whatever strict mode accepts, lenient mode must accept too.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let strict = Dialect::default().with_memoize(false);
        let lenient = strict.clone().with_strict_mode(false);
        if parse_with(s, &strict).is_ok() && parse_with(s, &lenient).is_err() {
            panic!("strict parse succeeded but lenient failed!\nInput: {s:?}");
        }
    }
});
