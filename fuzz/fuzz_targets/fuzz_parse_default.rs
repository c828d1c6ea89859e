#![no_main]
use libfuzzer_sys::fuzz_target;
use sheetlight::{Dialect, diagnostic, parse_with, stringify_with};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let d = Dialect::default().with_memoize(false);
        match parse_with(s, &d) {
            Ok(grid) => {
                if let Ok(text) = stringify_with(&grid, &d) {
                    let _ = parse_with(&text, &d);
                }
            }
            Err(e) => {
                let _ = diagnostic::render(s, &e, &d);
            }
        }
    }
});
