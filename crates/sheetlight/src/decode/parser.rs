use crate::decode::process::{ProcessError, TokenFlags, process_token, unescape};
use crate::decode::scanner::{Boundary, RawToken, Scanner, char_offset};
use crate::error::{Error, Location, Result};
use crate::options::Dialect;
use crate::value::Cell;

/// Rows, headers and shape collected from one source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub rows: Vec<Vec<Cell>>,
    pub headers: Vec<String>,
    pub is_table: bool,
}

pub fn parse_document(src: &str, dialect: &Dialect) -> Result<Parsed> {
    let mut builder = Builder::new(src, dialect);
    for token in Scanner::new(src, dialect) {
        builder.accept(token)?;
    }
    Ok(builder.finish())
}

struct Builder<'a> {
    src: &'a str,
    dialect: &'a Dialect,
    rows: Vec<Vec<Cell>>,
    row: Vec<Cell>,
    headers: Vec<String>,
    in_header: bool,
    /// Width every row must share for the grid to be a table.
    width: Option<usize>,
    is_table: bool,
    /// 0-based source line, counting skipped and header lines.
    line: usize,
}

/// A token after trimming and quote stripping.
struct Prepared<'a> {
    trimmed: &'a str,
    /// Byte offset of `trimmed` in the source.
    trimmed_at: usize,
    inner: &'a str,
    inner_at: usize,
    flags: TokenFlags,
}

impl<'a> Builder<'a> {
    fn new(src: &'a str, dialect: &'a Dialect) -> Self {
        Self {
            src,
            dialect,
            rows: Vec::new(),
            row: Vec::new(),
            headers: Vec::new(),
            in_header: dialect.has_headers,
            width: None,
            is_table: true,
            line: 0,
        }
    }

    fn current_len(&self) -> usize {
        if self.in_header {
            self.headers.len()
        } else {
            self.row.len()
        }
    }

    fn locate(&self, start: usize, end: usize) -> Location {
        Location {
            start: char_offset(self.src, start),
            end: char_offset(self.src, end),
            row: self.line + 1,
            column: self.current_len() + 1,
        }
    }

    fn prepare(&self, token: &RawToken<'a>) -> Prepared<'a> {
        let (trimmed, trimmed_at) = if self.dialect.strict_mode {
            let lead = token.text.len() - token.text.trim_start().len();
            (token.text.trim(), token.start + lead)
        } else {
            (token.text, token.start)
        };
        let json = token.json && is_json_literal(trimmed);
        let q = self.dialect.quote.as_str();
        let quoted = !json
            && trimmed.len() >= 2 * q.len()
            && trimmed.starts_with(q)
            && trimmed.ends_with(q);
        let (inner, inner_at) = if quoted {
            (&trimmed[q.len()..trimmed.len() - q.len()], trimmed_at + q.len())
        } else {
            (trimmed, trimmed_at)
        };
        Prepared {
            trimmed,
            trimmed_at,
            inner,
            inner_at,
            flags: TokenFlags { quoted, json },
        }
    }

    fn accept(&mut self, token: RawToken<'a>) -> Result<()> {
        let prepared = self.prepare(&token);
        let blank_line = prepared.trimmed.is_empty()
            && self.current_len() == 0
            && token.boundary != Boundary::Delimiter;
        if blank_line {
            match token.boundary {
                // A trailing line break terminates the last row, it does not open one.
                Boundary::End => return Ok(()),
                Boundary::LineBreak if self.dialect.ignore_empty_lines => {
                    self.line += 1;
                    return Ok(());
                }
                _ => {}
            }
        }

        if token.unterminated {
            let cell = self.unterminated(&token, &prepared)?;
            return self.push(cell, token.boundary, &token, &prepared);
        }

        if self.in_header {
            let header = self.header(&token, &prepared)?;
            self.headers.push(header);
            if token.boundary != Boundary::Delimiter {
                self.end_header();
            }
            return Ok(());
        }

        let cell = process_token(prepared.inner, prepared.flags, self.dialect)
            .map_err(|e| self.process_error(e, &token, &prepared))?;
        self.push(cell, token.boundary, &token, &prepared)
    }

    fn push(
        &mut self,
        cell: Cell,
        boundary: Boundary,
        token: &RawToken<'a>,
        prepared: &Prepared<'a>,
    ) -> Result<()> {
        if self.in_header {
            let Cell::String(text) = cell else {
                return Err(Error::InvalidHeader {
                    at: self.locate(prepared.trimmed_at, token.end),
                });
            };
            self.headers.push(text);
            if boundary != Boundary::Delimiter {
                self.end_header();
            }
            return Ok(());
        }
        self.row.push(cell);
        if boundary != Boundary::Delimiter {
            self.end_row();
        }
        Ok(())
    }

    /// Quote run or JSON literal still open at end of input.
    fn unterminated(&self, token: &RawToken<'a>, prepared: &Prepared<'a>) -> Result<Cell> {
        if !self.dialect.strict_mode {
            return Ok(Cell::String(prepared.trimmed.to_string()));
        }
        let at = self.locate(prepared.trimmed_at, token.end);
        if token.json {
            return Err(Error::InvalidJson {
                at,
                message: "object or array literal was never closed".to_string(),
            });
        }
        if prepared.trimmed.starts_with(self.dialect.quote.as_str()) {
            return Err(Error::UnterminatedQuote { at });
        }
        let offset = prepared.trimmed.find(self.dialect.quote.as_str()).unwrap_or(0);
        let start = prepared.trimmed_at + offset;
        Err(Error::MalformedQuoting {
            at: self.locate(start, start + self.dialect.quote.len()),
        })
    }

    /// Header names are always text: literals are not coerced and JSON is
    /// rejected.
    fn header(&self, token: &RawToken<'a>, prepared: &Prepared<'a>) -> Result<String> {
        if prepared.flags.json {
            return Err(Error::InvalidHeader {
                at: self.locate(prepared.trimmed_at, token.end),
            });
        }
        let word = unescape(
            prepared.inner,
            prepared.flags.quoted,
            &self.dialect.quote,
            self.dialect.strict_mode,
        )
        .map_err(|e| self.process_error(e, token, prepared))?;
        Ok(word.into_owned())
    }

    fn process_error(&self, err: ProcessError, token: &RawToken<'a>, prepared: &Prepared<'a>) -> Error {
        match err {
            ProcessError::MalformedQuoting { offset } => {
                let start = prepared.inner_at + offset;
                Error::MalformedQuoting {
                    at: self.locate(start, start + self.dialect.quote.len()),
                }
            }
            ProcessError::InvalidJson { message } => Error::InvalidJson {
                at: self.locate(prepared.trimmed_at, token.end),
                message,
            },
        }
    }

    fn end_header(&mut self) {
        self.in_header = false;
        self.width = Some(self.headers.len());
        self.line += 1;
        tracing::trace!(headers = self.headers.len(), "header row complete");
    }

    fn end_row(&mut self) {
        let row = std::mem::take(&mut self.row);
        match self.width {
            Some(width) if width != row.len() => self.is_table = false,
            Some(_) => {}
            None => self.width = Some(row.len()),
        }
        self.line += 1;
        tracing::trace!(row = self.rows.len() + 1, cells = row.len(), "row complete");
        self.rows.push(row);
    }

    fn finish(mut self) -> Parsed {
        if !self.row.is_empty() {
            self.end_row();
        }
        if self.rows.is_empty() {
            self.rows.push(vec![self.dialect.empty.clone()]);
            self.is_table = false;
        }
        Parsed {
            rows: self.rows,
            headers: self.headers,
            is_table: self.is_table,
        }
    }
}

fn is_json_literal(s: &str) -> bool {
    (s.starts_with('{') && s.ends_with('}')) || (s.starts_with('[') && s.ends_with(']'))
}

