//! Human-readable rendering of parse errors against their source text.

use core::fmt::Write as _;

use crate::error::Error;
use crate::options::{CRLF, Dialect};

/// Characters of context shown on each side of the offending token.
const CONTEXT: usize = 20;
const RULE: &str = "-----------------------------------";

/// Render an excerpt of `source` pointing at the position carried by
/// `error`, or `None` if the error has no source position.
///
/// Line breaks and carriage returns are shown as `\n` and `\r` so the excerpt
/// fits on one line.
pub fn render(source: &str, error: &Error, dialect: &Dialect) -> Option<String> {
    let at = error.location()?;
    let chars: Vec<char> = source.chars().collect();
    let from = at.start.saturating_sub(CONTEXT);
    let to = (at.end + CONTEXT).min(chars.len());
    let at_end = at.start >= chars.len();

    let mut excerpt = String::new();
    if from > 0 {
        excerpt.push_str("...");
    }
    let mut caret = excerpt.chars().count();
    for (i, &ch) in chars.iter().enumerate().take(to).skip(from) {
        let shown = visible(ch);
        if i < at.start {
            caret += shown.chars().count();
        }
        excerpt.push_str(&shown);
    }
    if at_end {
        excerpt.push_str(" (end of input)");
    } else if to < chars.len() {
        excerpt.push_str("...");
    }

    let pad = " ".repeat(caret);
    let mut out = String::new();
    let _ = writeln!(out, "{error}");
    let _ = writeln!(
        out,
        "invalid text from position {} to position {} (row {}, column {})",
        at.start, at.end, at.row, at.column
    );
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "{pad}error here");
    let _ = writeln!(out, "{pad}\u{2193}");
    let _ = writeln!(out, "{excerpt}");
    out.push_str(RULE);
    if dialect.line_break == CRLF && !source.contains(CRLF) && source.contains('\n') {
        out.push_str("\nhint: the line break is set to \\r\\n but the text uses \\n");
    }
    Some(out)
}

fn visible(ch: char) -> String {
    match ch {
        '\r' => "\\r".to_string(),
        '\n' => "\\n".to_string(),
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
