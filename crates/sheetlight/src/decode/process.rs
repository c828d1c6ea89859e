//! Turns one trimmed token into a typed cell.

use std::borrow::Cow;

use crate::number::parse_numeric_literal;
use crate::options::Dialect;
use crate::value::Cell;

/// How the tokenizer saw the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenFlags {
    /// The token was wrapped in quotes; `token` is the inner text.
    pub quoted: bool,
    /// The token is an embedded JSON object or array literal.
    pub json: bool,
}

/// Failure while decoding a single token. Offsets are byte offsets into the
/// token text handed to [`process_token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    MalformedQuoting { offset: usize },
    InvalidJson { message: String },
}

/// Decode `token` into a cell.
///
/// Inside a quoted token a doubled quote is an escaped quote and any other
/// quote is malformed; an unquoted token may not contain quotes at all. In
/// lenient mode malformed quotes are kept as literal text instead.
pub fn process_token(
    token: &str,
    flags: TokenFlags,
    dialect: &Dialect,
) -> Result<Cell, ProcessError> {
    if flags.json {
        return serde_json::from_str::<serde_json::Value>(token)
            .map(Cell::from)
            .map_err(|e| ProcessError::InvalidJson {
                message: e.to_string(),
            });
    }
    if token.is_empty() {
        return Ok(if flags.quoted {
            Cell::String(String::new())
        } else {
            dialect.empty.clone()
        });
    }
    let word = unescape(token, flags.quoted, &dialect.quote, dialect.strict_mode)?;
    if dialect.coerce_literals && !flags.quoted {
        return Ok(coerce_literal(&word).unwrap_or_else(|| Cell::String(word.into_owned())));
    }
    Ok(Cell::String(word.into_owned()))
}

/// Collapse escaped quote pairs. Borrows when the token holds no quotes.
pub(crate) fn unescape<'t>(
    token: &'t str,
    quoted: bool,
    quote: &str,
    strict: bool,
) -> Result<Cow<'t, str>, ProcessError> {
    let Some(first) = token.find(quote) else {
        return Ok(Cow::Borrowed(token));
    };
    if !quoted {
        if strict {
            return Err(ProcessError::MalformedQuoting { offset: first });
        }
        return Ok(Cow::Borrowed(token));
    }

    let mut word = String::with_capacity(token.len());
    let mut from = 0usize;
    let mut at = first;
    loop {
        word.push_str(&token[from..at]);
        let after = at + quote.len();
        if token[after..].starts_with(quote) {
            word.push_str(quote);
            from = after + quote.len();
        } else if strict {
            return Err(ProcessError::MalformedQuoting { offset: at });
        } else {
            word.push_str(quote);
            from = after;
        }
        match token[from..].find(quote) {
            Some(rel) => at = from + rel,
            None => break,
        }
    }
    word.push_str(&token[from..]);
    Ok(Cow::Owned(word))
}

/// Literal keywords and numbers; `None` keeps the text as a string.
pub(crate) fn coerce_literal(word: &str) -> Option<Cell> {
    match word {
        "true" | "TRUE" => Some(Cell::Bool(true)),
        "false" | "FALSE" => Some(Cell::Bool(false)),
        "null" | "NULL" => Some(Cell::Null),
        _ => parse_numeric_literal(word).map(Cell::Number),
    }
}
