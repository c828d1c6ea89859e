#![no_main]
use libfuzzer_sys::fuzz_target;
use sheetlight::{Dialect, parse_with};

// Lenient parsing with unusual markers: every input must either parse or
// fail cleanly.
fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let d = Dialect::default()
            .with_memoize(false)
            .with_strict_mode(false)
            .with_quote("''")
            .with_delimiter("\t")
            .with_line_break("\n")
            .with_headers(true)
            .with_ignore_empty_lines(true);
        if let Ok(grid) = parse_with(s, &d) {
            let _ = grid.as_text();
            let _ = grid.read("@bottom", "@right");
        }
    }
});
