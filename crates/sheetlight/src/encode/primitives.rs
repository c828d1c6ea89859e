use crate::number::format_number;
use crate::options::Dialect;
use crate::value::Cell;

/// Plain text of a cell, without quoting. Embedded arrays and objects are
/// written as compact JSON.
pub fn write_cell_text(out: &mut String, cell: &Cell) {
    match cell {
        Cell::Empty => {}
        Cell::Null => out.push_str("null"),
        Cell::Bool(true) => out.push_str("true"),
        Cell::Bool(false) => out.push_str("false"),
        Cell::Number(n) => out.push_str(&format_number(n)),
        Cell::String(s) => out.push_str(s),
        Cell::Array(_) | Cell::Object(_) => {
            // `to_json` only yields maps and sequences here; serializing
            // those to a String cannot fail.
            if let Ok(json) = serde_json::to_string(&cell.to_json()) {
                out.push_str(&json);
            }
        }
    }
}

/// Wrap `text` in `quote`, doubling every quote inside it.
pub fn escape_and_quote_into(out: &mut String, text: &str, quote: &str) {
    out.reserve(text.len() + 2 * quote.len());
    out.push_str(quote);
    let mut rest = text;
    while let Some(at) = rest.find(quote) {
        out.push_str(&rest[..at + quote.len()]);
        out.push_str(quote);
        rest = &rest[at + quote.len()..];
    }
    out.push_str(rest);
    out.push_str(quote);
}

pub fn escape_and_quote(text: &str, quote: &str) -> String {
    let mut out = String::new();
    escape_and_quote_into(&mut out, text, quote);
    out
}

/// Whether a cell is written without surrounding quotes.
///
/// Strings are always quoted so they read back as text. Literals and JSON
/// stay bare while the dialect coerces them back into typed cells; with
/// coercion off they would read back as text anyway, so they are quoted
/// like any other string.
pub fn is_bare(cell: &Cell, dialect: &Dialect) -> bool {
    match cell {
        Cell::Empty => true,
        Cell::String(_) => false,
        Cell::Null | Cell::Bool(_) | Cell::Number(_) | Cell::Array(_) | Cell::Object(_) => {
            dialect.coerce_literals
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(escape_and_quote("a\"b\"c", "\""), "\"a\"\"b\"\"c\"");
        assert_eq!(escape_and_quote("", "\""), "\"\"");
        assert_eq!(escape_and_quote("x~~y", "~~"), "~~x~~~~y~~");
    }

    #[test]
    fn cell_text() {
        let mut s = String::new();
        write_cell_text(&mut s, &Cell::Number(Number::F64(2.5)));
        s.push('|');
        write_cell_text(&mut s, &Cell::Array(vec![Cell::Null, Cell::from("x")]));
        s.push('|');
        write_cell_text(&mut s, &Cell::Empty);
        assert_eq!(s, "2.5|[null,\"x\"]|");
    }

    #[test]
    fn bare_cells_follow_coercion() {
        let on = Dialect::default();
        let off = Dialect::default().with_coerce_literals(false);
        assert!(is_bare(&Cell::Bool(true), &on));
        assert!(!is_bare(&Cell::Bool(true), &off));
        assert!(!is_bare(&Cell::from("true"), &on));
        assert!(is_bare(&Cell::Empty, &off));
    }
}
