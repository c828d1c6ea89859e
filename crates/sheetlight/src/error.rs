use core::fmt;

use thiserror::Error;

/// Where a parse error happened.
///
/// `start` and `end` are character offsets into the source text (end is
/// exclusive), `row` and `column` are the 1-based grid coordinates the
/// offending token would have occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Location {
    pub start: usize,
    pub end: usize,
    pub row: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}, column {} (characters {}..{})",
            self.row, self.column, self.start, self.end
        )
    }
}

/// Coarse classification of [`Error`], for callers that only need to
/// discriminate between families of failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyInput,
    InvalidLeadingCharacter,
    UnterminatedQuote,
    MalformedQuoting,
    InvalidJson,
    InvalidHeader,
    NotATable,
    CellOutOfBounds,
    InvalidSelector,
    InvalidBase26Letters,
    UnrepresentableValue,
    InvalidEmptySentinel,
    InvalidDialect,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("trying to parse an empty string")]
    EmptyInput,

    #[error("text began with an invalid character")]
    InvalidLeadingCharacter,

    #[error("the quoted value opened at {at} was never closed")]
    UnterminatedQuote { at: Location },

    #[error(
        "invalid use of quotes at {at}: a quote may only wrap the whole value, \
         and must be written twice to escape it inside a quoted value"
    )]
    MalformedQuoting { at: Location },

    #[error("invalid JSON literal at {at}: {message}")]
    InvalidJson { at: Location, message: String },

    #[error("header at {at} must be text, not a JSON literal")]
    InvalidHeader { at: Location },

    #[error("the grid is not in table format ({operation})")]
    NotATable { operation: &'static str },

    #[error("row {row} not found, the grid has {rows} rows")]
    RowNotFound { row: usize, rows: usize },

    #[error("column {column} not found, the grid has {columns} columns")]
    ColumnNotFound { column: usize, columns: usize },

    #[error("invalid selector {selector:?}")]
    InvalidSelector { selector: String },

    #[error("only letters from \"A\" to \"Z\" can be used to match a column, got {letters:?}")]
    InvalidBase26Letters { letters: String },

    #[error("the value cannot be stored in a cell")]
    UnrepresentableValue,

    #[error("the empty cell sentinel must be the empty marker or null")]
    InvalidEmptySentinel,

    #[error("invalid dialect: {reason}")]
    InvalidDialect { reason: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::EmptyInput => ErrorKind::EmptyInput,
            Error::InvalidLeadingCharacter => ErrorKind::InvalidLeadingCharacter,
            Error::UnterminatedQuote { .. } => ErrorKind::UnterminatedQuote,
            Error::MalformedQuoting { .. } => ErrorKind::MalformedQuoting,
            Error::InvalidJson { .. } => ErrorKind::InvalidJson,
            Error::InvalidHeader { .. } => ErrorKind::InvalidHeader,
            Error::NotATable { .. } => ErrorKind::NotATable,
            Error::RowNotFound { .. } | Error::ColumnNotFound { .. } => ErrorKind::CellOutOfBounds,
            Error::InvalidSelector { .. } => ErrorKind::InvalidSelector,
            Error::InvalidBase26Letters { .. } => ErrorKind::InvalidBase26Letters,
            Error::UnrepresentableValue => ErrorKind::UnrepresentableValue,
            Error::InvalidEmptySentinel => ErrorKind::InvalidEmptySentinel,
            Error::InvalidDialect { .. } => ErrorKind::InvalidDialect,
        }
    }

    /// Source position for errors raised while scanning text.
    pub fn location(&self) -> Option<Location> {
        match self {
            Error::UnterminatedQuote { at }
            | Error::MalformedQuoting { at }
            | Error::InvalidJson { at, .. }
            | Error::InvalidHeader { at } => Some(*at),
            _ => None,
        }
    }

    pub(crate) fn invalid_dialect(reason: impl Into<String>) -> Self {
        Error::InvalidDialect {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
