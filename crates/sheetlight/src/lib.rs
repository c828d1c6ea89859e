#![doc = include_str!("../README.md")]

pub mod column;
pub mod decode;
pub mod diagnostic;
pub mod encode;
pub mod error;
pub mod grid;
mod number;
pub mod options;
pub mod value;

pub use crate::encode::Tabular;
pub use crate::error::{Error, ErrorKind, Location, Result};
pub use crate::grid::selector::{CellSelector, Corner, Edge, RangeSelector};
pub use crate::grid::{Grid, Size};
pub use crate::options::{Dialect, DialectPatch, configure, dialect, reset_dialect};
pub use crate::value::{Cell, Number, is_value_object};

/// Parse `text` with the process-wide dialect.
pub fn parse(text: &str) -> Result<Grid> {
    parse_with(text, &dialect())
}

/// Parse `text` with an explicit dialect.
pub fn parse_with(text: &str, dialect: &Dialect) -> Result<Grid> {
    crate::decode::parse_grid(text, dialect)
}

/// Serialize a grid or raw rows with the process-wide dialect.
pub fn stringify<T: Tabular + ?Sized>(data: &T) -> Result<String> {
    stringify_with(data, &dialect())
}

/// Serialize a grid or raw rows with an explicit dialect.
pub fn stringify_with<T: Tabular + ?Sized>(data: &T, dialect: &Dialect) -> Result<String> {
    crate::encode::stringify_rows(data, dialect)
}
