//! Single-pass tokenizer.
//!
//! Splits the source into raw tokens at delimiters and line breaks that are
//! not inside a quoted run (or inside an embedded JSON literal). Tokens are
//! returned untouched; trimming, unquoting and typing happen later.

use crate::options::Dialect;

/// What ended a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Next cell on the same row.
    Delimiter,
    /// End of the current row.
    LineBreak,
    /// End of input.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken<'a> {
    pub text: &'a str,
    /// Byte range of `text` in the scanned source.
    pub start: usize,
    pub end: usize,
    pub boundary: Boundary,
    /// Scanned as an embedded JSON literal (brackets tracked instead of quotes).
    pub json: bool,
    /// A quote run or JSON literal was still open when input ran out.
    pub unterminated: bool,
}

/// Scan state for one parse call. Never shared between calls.
pub struct Scanner<'a> {
    src: &'a str,
    quote: &'a str,
    delimiter: &'a str,
    line_break: &'a str,
    detect_json: bool,
    pos: usize,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(src: &'a str, dialect: &'a Dialect) -> Self {
        Self {
            src,
            quote: &dialect.quote,
            delimiter: &dialect.delimiter,
            line_break: &dialect.line_break,
            detect_json: dialect.coerce_literals,
            pos: 0,
            done: false,
        }
    }

    /// Boundary starting at byte `at`, and its length. Line breaks win over
    /// delimiters so a delimiter that prefixes the line break is not
    /// mistaken for a cell boundary.
    #[inline]
    fn boundary_at(&self, at: usize) -> Option<(Boundary, usize)> {
        let rest = &self.src[at..];
        if rest.starts_with(self.line_break) {
            Some((Boundary::LineBreak, self.line_break.len()))
        } else if rest.starts_with(self.delimiter) {
            Some((Boundary::Delimiter, self.delimiter.len()))
        } else {
            None
        }
    }

    /// Whether the token starting at `start` opens with `{` or `[`, ignoring
    /// leading whitespace that is not itself a boundary.
    fn opens_json(&self, start: usize) -> bool {
        if !self.detect_json {
            return false;
        }
        for (off, ch) in self.src[start..].char_indices() {
            match ch {
                '{' | '[' => return true,
                c if c.is_whitespace() && self.boundary_at(start + off).is_none() => continue,
                _ => return false,
            }
        }
        false
    }

    /// Next byte at or after `from` that can start a boundary or a quote.
    #[inline]
    #[cfg(feature = "perf_memchr")]
    fn next_candidate(&self, from: usize, in_quotes: bool) -> usize {
        let bytes = &self.src.as_bytes()[from..];
        let q = self.quote.as_bytes()[0];
        let found = if in_quotes {
            memchr::memchr(q, bytes)
        } else {
            memchr::memchr3(
                q,
                self.delimiter.as_bytes()[0],
                self.line_break.as_bytes()[0],
                bytes,
            )
        };
        found.map_or(self.src.len(), |rel| from + rel)
    }

    #[inline]
    #[cfg(not(feature = "perf_memchr"))]
    fn next_candidate(&self, from: usize, in_quotes: bool) -> usize {
        let q = self.quote.as_bytes()[0];
        let d = self.delimiter.as_bytes()[0];
        let l = self.line_break.as_bytes()[0];
        for (i, &b) in self.src.as_bytes()[from..].iter().enumerate() {
            if b == q || (!in_quotes && (b == d || b == l)) {
                return from + i;
            }
        }
        self.src.len()
    }

    fn scan_quoted(&mut self, start: usize) -> RawToken<'a> {
        let mut in_quotes = false;
        let mut i = start;
        loop {
            i = self.next_candidate(i, in_quotes);
            if i >= self.src.len() {
                return self.finish(start, in_quotes, false);
            }
            if self.src[i..].starts_with(self.quote) {
                in_quotes = !in_quotes;
                i += self.quote.len();
                continue;
            }
            if !in_quotes {
                if let Some((boundary, len)) = self.boundary_at(i) {
                    return self.emit(start, i, len, boundary, false);
                }
            }
            i += char_len(self.src, i);
        }
    }

    fn scan_json(&mut self, start: usize) -> RawToken<'a> {
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;
        let mut i = start;
        while i < self.src.len() {
            if depth == 0 && !in_string {
                if let Some((boundary, len)) = self.boundary_at(i) {
                    return self.emit(start, i, len, boundary, true);
                }
            }
            let b = self.src.as_bytes()[i];
            if in_string {
                if escaped {
                    escaped = false;
                } else if b == b'\\' {
                    escaped = true;
                } else if b == b'"' {
                    in_string = false;
                }
            } else {
                match b {
                    b'"' => in_string = true,
                    b'{' | b'[' => depth += 1,
                    b'}' | b']' => depth = depth.saturating_sub(1),
                    _ => {}
                }
            }
            i += char_len(self.src, i);
        }
        self.finish(start, depth > 0 || in_string, true)
    }

    fn emit(
        &mut self,
        start: usize,
        end: usize,
        boundary_len: usize,
        boundary: Boundary,
        json: bool,
    ) -> RawToken<'a> {
        self.pos = end + boundary_len;
        RawToken {
            text: &self.src[start..end],
            start,
            end,
            boundary,
            json,
            unterminated: false,
        }
    }

    fn finish(&mut self, start: usize, unterminated: bool, json: bool) -> RawToken<'a> {
        self.pos = self.src.len();
        self.done = true;
        RawToken {
            text: &self.src[start..],
            start,
            end: self.src.len(),
            boundary: Boundary::End,
            json,
            unterminated,
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = RawToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let start = self.pos;
        if start >= self.src.len() {
            return Some(self.finish(start, false, false));
        }
        if self.opens_json(start) {
            Some(self.scan_json(start))
        } else {
            Some(self.scan_quoted(start))
        }
    }
}

#[inline]
fn char_len(s: &str, at: usize) -> usize {
    s[at..].chars().next().map_or(1, char::len_utf8)
}

/// Character offset of byte index `byte` in `src`.
pub(crate) fn char_offset(src: &str, byte: usize) -> usize {
    src[..byte].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(src: &str, dialect: &Dialect) -> Vec<(String, Boundary)> {
        Scanner::new(src, dialect)
            .map(|t| (t.text.to_string(), t.boundary))
            .collect()
    }

    #[test]
    fn splits_on_delimiters_and_breaks() {
        let d = Dialect::default();
        assert_eq!(
            tokens("a,b\r\nc", &d),
            vec![
                ("a".into(), Boundary::Delimiter),
                ("b".into(), Boundary::LineBreak),
                ("c".into(), Boundary::End),
            ]
        );
    }

    #[test]
    fn quoted_delimiters_are_content() {
        let d = Dialect::default();
        let t = tokens("\"a,b\",c", &d);
        assert_eq!(t[0].0, "\"a,b\"");
        assert_eq!(t[1].0, "c");
    }

    #[test]
    fn json_literal_keeps_commas() {
        let d = Dialect::default();
        let t: Vec<_> = Scanner::new("{\"a\":1,\"b\":[1,2]},x", &d).collect();
        assert_eq!(t[0].text, "{\"a\":1,\"b\":[1,2]}");
        assert!(t[0].json);
        assert_eq!(t[1].text, "x");
    }

    #[test]
    fn json_is_not_tracked_without_coercion() {
        let d = Dialect::default().with_coerce_literals(false);
        let t: Vec<_> = Scanner::new("[1,2]", &d).collect();
        assert_eq!(t.len(), 2);
        assert!(!t[0].json);
    }

    #[test]
    fn open_quote_runs_to_end() {
        let d = Dialect::default();
        let t: Vec<_> = Scanner::new("a,\"b,c", &d).collect();
        assert_eq!(t.len(), 2);
        assert_eq!(t[1].text, "\"b,c");
        assert!(t[1].unterminated);
    }

    #[test]
    fn trailing_break_yields_empty_final_token() {
        let d = Dialect::default();
        let t: Vec<_> = Scanner::new("a\r\n", &d).collect();
        assert_eq!(t.len(), 2);
        assert_eq!(t[1].text, "");
        assert_eq!(t[1].boundary, Boundary::End);
    }

    #[test]
    fn multi_character_markers() {
        let d = Dialect::default()
            .with_delimiter("::")
            .with_line_break("||")
            .with_quote("'");
        assert_eq!(
            tokens("a::'b::c'||d", &d),
            vec![
                ("a".into(), Boundary::Delimiter),
                ("'b::c'".into(), Boundary::LineBreak),
                ("d".into(), Boundary::End),
            ]
        );
    }
}
