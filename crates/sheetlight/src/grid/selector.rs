//! Row, column and corner addresses.
//!
//! Textual grammar, case-insensitive:
//!
//! ```text
//! cell   := <int> | <letters> | "@bottom" | "@right"
//! corner := "@left-top" | "@right-top" | "@left-bottom" | "@right-bottom"
//! range  := corner | <letters><int>          (A1 style, e.g. "C12")
//! ```
//!
//! Indices are 1-based. `@bottom` is only meaningful for rows and `@right`
//! only for columns.

use core::fmt;
use core::str::FromStr;

use crate::column;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Last row.
    Bottom,
    /// Last column.
    Right,
}

/// Which coordinate a [`CellSelector`] is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Axis {
    Row,
    Column,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CellSelector {
    /// 1-based position.
    Index(usize),
    /// Bijective base-26 column name, `A` is 1.
    Letters(String),
    Edge(Edge),
}

impl CellSelector {
    /// Resolve to a 1-based position given the number of entries on the
    /// axis. The result may lie beyond `extent`; bounds are the caller's
    /// concern.
    pub(crate) fn resolve(&self, axis: Axis, extent: usize) -> Result<usize> {
        match self {
            CellSelector::Index(0) => Err(Error::InvalidSelector {
                selector: "0".to_string(),
            }),
            CellSelector::Index(i) => Ok(*i),
            CellSelector::Letters(letters) => column::to_number(letters),
            CellSelector::Edge(edge) => match (edge, axis) {
                (Edge::Bottom, Axis::Row) | (Edge::Right, Axis::Column) => Ok(extent),
                (Edge::Bottom, Axis::Column) => Err(Error::InvalidSelector {
                    selector: "@bottom".to_string(),
                }),
                (Edge::Right, Axis::Row) => Err(Error::InvalidSelector {
                    selector: "@right".to_string(),
                }),
            },
        }
    }
}

impl FromStr for CellSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let t = s.trim();
        let invalid = || Error::InvalidSelector {
            selector: s.to_string(),
        };
        if let Some(edge) = t.strip_prefix('@') {
            return match edge.to_ascii_lowercase().as_str() {
                "bottom" => Ok(CellSelector::Edge(Edge::Bottom)),
                "right" => Ok(CellSelector::Edge(Edge::Right)),
                _ => Err(invalid()),
            };
        }
        if !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()) {
            return match t.parse::<usize>() {
                Ok(0) | Err(_) => Err(invalid()),
                Ok(i) => Ok(CellSelector::Index(i)),
            };
        }
        if !t.is_empty() && t.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Ok(CellSelector::Letters(t.to_ascii_uppercase()));
        }
        Err(invalid())
    }
}

impl From<usize> for CellSelector {
    fn from(i: usize) -> Self {
        CellSelector::Index(i)
    }
}

// Lets integer literals be passed directly; negative values never resolve.
impl From<i32> for CellSelector {
    fn from(i: i32) -> Self {
        CellSelector::Index(usize::try_from(i).unwrap_or(0))
    }
}

impl From<Edge> for CellSelector {
    fn from(edge: Edge) -> Self {
        CellSelector::Edge(edge)
    }
}

impl From<&str> for CellSelector {
    /// Parses the selector grammar. Text outside it is kept as letters and
    /// fails when resolved; use [`str::parse`] to reject it up front.
    fn from(s: &str) -> Self {
        s.parse()
            .unwrap_or_else(|_| CellSelector::Letters(s.to_string()))
    }
}

impl fmt::Display for CellSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellSelector::Index(i) => write!(f, "{i}"),
            CellSelector::Letters(l) => f.write_str(l),
            CellSelector::Edge(Edge::Bottom) => f.write_str("@bottom"),
            CellSelector::Edge(Edge::Right) => f.write_str("@right"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    LeftTop,
    RightTop,
    LeftBottom,
    RightBottom,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RangeSelector {
    Corner(Corner),
    Cell { row: CellSelector, column: CellSelector },
}

impl RangeSelector {
    pub fn cell(row: impl Into<CellSelector>, column: impl Into<CellSelector>) -> Self {
        RangeSelector::Cell {
            row: row.into(),
            column: column.into(),
        }
    }

    /// Resolve to 1-based `(row, column)` for a `rows` x `columns` grid.
    pub(crate) fn resolve(&self, rows: usize, columns: usize) -> Result<(usize, usize)> {
        match self {
            RangeSelector::Corner(Corner::LeftTop) => Ok((1, 1)),
            RangeSelector::Corner(Corner::RightTop) => Ok((1, columns)),
            RangeSelector::Corner(Corner::LeftBottom) => Ok((rows, 1)),
            RangeSelector::Corner(Corner::RightBottom) => Ok((rows, columns)),
            RangeSelector::Cell { row, column } => Ok((
                row.resolve(Axis::Row, rows)?,
                column.resolve(Axis::Column, columns)?,
            )),
        }
    }
}

impl FromStr for RangeSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let t = s.trim();
        let invalid = || Error::InvalidSelector {
            selector: s.to_string(),
        };
        if let Some(corner) = t.strip_prefix('@') {
            let corner = match corner.to_ascii_lowercase().as_str() {
                "left-top" => Corner::LeftTop,
                "right-top" => Corner::RightTop,
                "left-bottom" => Corner::LeftBottom,
                "right-bottom" => Corner::RightBottom,
                _ => return Err(invalid()),
            };
            return Ok(RangeSelector::Corner(corner));
        }
        let split = t
            .find(|c: char| !c.is_ascii_alphabetic())
            .ok_or_else(invalid)?;
        let (letters, digits) = t.split_at(split);
        if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let row = match digits.parse::<usize>() {
            Ok(0) | Err(_) => return Err(invalid()),
            Ok(i) => i,
        };
        Ok(RangeSelector::Cell {
            row: CellSelector::Index(row),
            column: CellSelector::Letters(letters.to_ascii_uppercase()),
        })
    }
}

impl From<Corner> for RangeSelector {
    fn from(corner: Corner) -> Self {
        RangeSelector::Corner(corner)
    }
}

impl<R: Into<CellSelector>, C: Into<CellSelector>> From<(R, C)> for RangeSelector {
    fn from((row, column): (R, C)) -> Self {
        RangeSelector::cell(row, column)
    }
}
