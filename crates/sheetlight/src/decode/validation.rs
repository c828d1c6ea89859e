//! Up-front checks on the source text before scanning.
use crate::error::{Error, Result};
use crate::options::Dialect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    /// Nothing to scan; the caller builds the empty grid.
    Empty,
    /// Text to scan, with any end character already removed.
    Body(&'a str),
}

pub fn check_source<'a>(text: &'a str, dialect: &Dialect) -> Result<Source<'a>> {
    dialect.validate()?;
    let body = if dialect.has_end_character {
        strip_end_character(text)
    } else {
        text
    };
    if body.is_empty() {
        if dialect.strict_mode {
            return Err(Error::EmptyInput);
        }
        return Ok(Source::Empty);
    }
    if body == dialect.quote {
        return Err(Error::InvalidLeadingCharacter);
    }
    Ok(Source::Body(body))
}

fn strip_end_character(text: &str) -> &str {
    match text.char_indices().next_back() {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
