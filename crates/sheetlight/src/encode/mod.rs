//! Serialization of grids and raw row arrays back to delimited text.

pub mod primitives;
pub mod writer;

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::options::Dialect;
use crate::value::{Cell, is_value_object};

use self::writer::RowWriter;

/// Anything that can be written out as rows of cells.
pub trait Tabular {
    /// Column names written before the data, if any.
    fn header_row(&self) -> Option<&[String]> {
        None
    }

    fn data_rows(&self) -> &[Vec<Cell>];
}

impl Tabular for Grid {
    fn header_row(&self) -> Option<&[String]> {
        if self.has_headers() && !self.headers().is_empty() {
            Some(self.headers())
        } else {
            None
        }
    }

    fn data_rows(&self) -> &[Vec<Cell>] {
        self.as_ref()
    }
}

impl Tabular for [Vec<Cell>] {
    fn data_rows(&self) -> &[Vec<Cell>] {
        self
    }
}

impl Tabular for Vec<Vec<Cell>> {
    fn data_rows(&self) -> &[Vec<Cell>] {
        self
    }
}

impl<const N: usize> Tabular for [Vec<Cell>; N] {
    fn data_rows(&self) -> &[Vec<Cell>] {
        self
    }
}

impl<T: Tabular + ?Sized> Tabular for &T {
    fn header_row(&self) -> Option<&[String]> {
        (**self).header_row()
    }

    fn data_rows(&self) -> &[Vec<Cell>] {
        (**self).data_rows()
    }
}

/// Serialize `data` under `dialect`.
///
/// Every cell is checked before anything is written, so an unrepresentable
/// value fails the whole call.
pub fn stringify_rows<T: Tabular + ?Sized>(data: &T, dialect: &Dialect) -> Result<String> {
    dialect.validate()?;
    let rows = data.data_rows();
    if !rows.iter().flatten().all(is_value_object) {
        return Err(Error::UnrepresentableValue);
    }
    let text = write_rows(data.header_row(), rows, dialect);
    tracing::debug!(rows = rows.len(), len = text.len(), "stringify finished");
    Ok(text)
}

/// Serialize rows already known to be representable.
pub(crate) fn write_rows(headers: Option<&[String]>, rows: &[Vec<Cell>], dialect: &Dialect) -> String {
    let mut w = RowWriter::new(dialect);
    if let Some(names) = headers {
        w.header_row(names);
    }
    for row in rows {
        w.row(row);
    }
    w.into_string()
}
