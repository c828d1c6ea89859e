//! The parsed spreadsheet: cell storage, headers, shape and addressing.

pub mod selector;

use core::fmt;
use std::sync::OnceLock;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::decode::parser::Parsed;
use crate::encode;
use crate::error::{Error, Result};
use crate::options::Dialect;
use crate::value::{Cell, is_value_object};

use self::selector::{Axis, CellSelector, RangeSelector};

/// Dimensions of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Size {
    pub rows: usize,
    pub columns: usize,
}

/// A parsed grid of cells.
///
/// Rows may differ in length unless the grid is a table. The grid is never
/// empty: an empty source yields a single cell holding the dialect's empty
/// marker. The text form is produced on first request and kept until the
/// next mutation.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
    headers: Vec<String>,
    has_headers: bool,
    is_table: bool,
    dialect: Dialect,
    text: OnceLock<String>,
}

impl Grid {
    pub(crate) fn from_parsed(parsed: Parsed, dialect: Dialect) -> Self {
        Self {
            cells: parsed.rows,
            headers: parsed.headers,
            has_headers: dialect.has_headers,
            is_table: parsed.is_table,
            dialect,
            text: OnceLock::new(),
        }
    }

    /// The one-cell grid produced for empty input.
    pub fn empty(dialect: Dialect) -> Self {
        Self {
            cells: vec![vec![dialect.empty.clone()]],
            headers: Vec::new(),
            has_headers: dialect.has_headers,
            is_table: false,
            dialect,
            text: OnceLock::new(),
        }
    }

    /// Build a grid from rows assembled in memory.
    ///
    /// Non-empty `headers` turn header output on. The grid is a table when
    /// every row has the same length, matching `headers` if given.
    pub fn from_rows(rows: Vec<Vec<Cell>>, headers: Vec<String>, dialect: Dialect) -> Result<Self> {
        dialect.validate()?;
        if !rows.iter().flatten().all(is_value_object) {
            return Err(Error::UnrepresentableValue);
        }
        let has_headers = !headers.is_empty();
        let dialect = dialect.with_headers(has_headers);
        if rows.is_empty() {
            let mut grid = Self::empty(dialect);
            grid.headers = headers;
            return Ok(grid);
        }
        let width = if has_headers { headers.len() } else { rows[0].len() };
        let is_table = rows.iter().all(|r| r.len() == width);
        Ok(Self {
            cells: rows,
            headers,
            has_headers,
            is_table,
            dialect,
            text: OnceLock::new(),
        })
    }

    pub fn is_table(&self) -> bool {
        self.is_table
    }

    pub fn has_headers(&self) -> bool {
        self.has_headers
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Dialect the grid was parsed with; also used for its text form.
    pub fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    /// Length of the longest row.
    pub fn columns(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Whether the text form has to be rebuilt on next request.
    pub fn is_dirty(&self) -> bool {
        self.text.get().is_none()
    }

    fn require_table(&self, operation: &'static str) -> Result<()> {
        if self.is_table {
            Ok(())
        } else {
            Err(Error::NotATable { operation })
        }
    }

    fn touch(&mut self) {
        self.text = OnceLock::new();
    }

    /// Width shared by every row of a table.
    fn width(&self) -> usize {
        self.cells.first().map_or(0, Vec::len)
    }

    pub fn size(&self) -> Result<Size> {
        self.require_table("size")?;
        Ok(Size {
            rows: self.rows(),
            columns: self.width(),
        })
    }

    /// Resolve and bounds-check a cell address on a table; 0-based result.
    fn locate(&self, row: &CellSelector, column: &CellSelector) -> Result<(usize, usize)> {
        let (rows, columns) = (self.rows(), self.width());
        let r = row.resolve(Axis::Row, rows)?;
        let c = column.resolve(Axis::Column, columns)?;
        if r == 0 || r > rows {
            return Err(Error::RowNotFound { row: r, rows });
        }
        if c == 0 || c > columns {
            return Err(Error::ColumnNotFound { column: c, columns });
        }
        Ok((r - 1, c - 1))
    }

    fn corner(&self, at: &RangeSelector) -> Result<(usize, usize)> {
        at.resolve(self.rows(), self.width())
    }

    /// Cell at `row`, `column`, or `None` when the address lies outside the
    /// grid. Works on ragged grids: `@right` is the end of the addressed row.
    pub fn read(
        &self,
        row: impl Into<CellSelector>,
        column: impl Into<CellSelector>,
    ) -> Result<Option<&Cell>> {
        let r = row.into().resolve(Axis::Row, self.rows())?;
        let Some(cells) = r.checked_sub(1).and_then(|i| self.cells.get(i)) else {
            return Ok(None);
        };
        let c = column.into().resolve(Axis::Column, cells.len())?;
        Ok(c.checked_sub(1).and_then(|i| cells.get(i)))
    }

    /// Replace one cell of a table.
    pub fn write(
        &mut self,
        value: impl Into<Cell>,
        row: impl Into<CellSelector>,
        column: impl Into<CellSelector>,
    ) -> Result<()> {
        self.require_table("write")?;
        let value = value.into();
        if !is_value_object(&value) {
            return Err(Error::UnrepresentableValue);
        }
        let (r, c) = self.locate(&row.into(), &column.into())?;
        self.cells[r][c] = value;
        self.touch();
        Ok(())
    }

    /// Write a block of values with its top-left cell at `start`.
    ///
    /// `start` must lie inside the table; values extending past its edges
    /// are dropped. Every value that would
    /// be written is checked first, so a rejected value leaves the grid
    /// untouched.
    pub fn bulk(&mut self, values: Vec<Vec<Cell>>, start: impl Into<RangeSelector>) -> Result<()> {
        self.require_table("bulk")?;
        let (r0, c0) = self.corner(&start.into())?;
        if r0 == 0 || c0 == 0 {
            return Err(Error::InvalidSelector {
                selector: format!("{r0}:{c0}"),
            });
        }
        let (rows, columns) = (self.rows(), self.width());
        if r0 > rows {
            return Err(Error::RowNotFound { row: r0, rows });
        }
        if c0 > columns {
            return Err(Error::ColumnNotFound { column: c0, columns });
        }
        let fit_rows = (rows + 1).saturating_sub(r0);
        let fit_columns = (columns + 1).saturating_sub(c0);

        let in_bounds = values
            .iter()
            .take(fit_rows)
            .flat_map(|row| row.iter().take(fit_columns));
        for value in in_bounds {
            if !is_value_object(value) {
                return Err(Error::UnrepresentableValue);
            }
        }

        let mut written = 0usize;
        for (i, row) in values.into_iter().take(fit_rows).enumerate() {
            for (j, value) in row.into_iter().take(fit_columns).enumerate() {
                self.cells[r0 - 1 + i][c0 - 1 + j] = value;
                written += 1;
            }
        }
        tracing::trace!(row = r0, column = c0, written, "bulk write");
        self.touch();
        Ok(())
    }

    /// Copy of the inclusive rectangle spanned by two corners, in either
    /// order.
    pub fn range(
        &self,
        from: impl Into<RangeSelector>,
        to: impl Into<RangeSelector>,
    ) -> Result<Vec<Vec<Cell>>> {
        self.require_table("range")?;
        let (rows, columns) = (self.rows(), self.width());
        let (r1, c1) = self.corner(&from.into())?;
        let (r2, c2) = self.corner(&to.into())?;
        let (top, bottom) = (r1.min(r2), r1.max(r2));
        let (left, right) = (c1.min(c2), c1.max(c2));
        if top == 0 || bottom > rows {
            return Err(Error::RowNotFound {
                row: if top == 0 { 0 } else { bottom },
                rows,
            });
        }
        if left == 0 || right > columns {
            return Err(Error::ColumnNotFound {
                column: if left == 0 { 0 } else { right },
                columns,
            });
        }
        Ok(self.cells[top - 1..bottom]
            .iter()
            .map(|row| row[left - 1..right].to_vec())
            .collect())
    }

    /// Deep copy of all rows.
    pub fn to_array(&self) -> Vec<Vec<Cell>> {
        self.cells.clone()
    }

    /// Text form under the grid's own dialect, built on first use after a
    /// change.
    pub fn as_text(&self) -> &str {
        self.text.get_or_init(|| {
            let headers = encode::Tabular::header_row(self);
            encode::write_rows(headers, &self.cells, &self.dialect)
        })
    }

    /// Insert an empty row before (or after) `at`.
    pub fn insert_row(&mut self, at: impl Into<CellSelector>, after: bool) -> Result<()> {
        self.require_table("insert row")?;
        let (r, _) = self.locate(&at.into(), &CellSelector::Index(1))?;
        let index = if after { r + 1 } else { r };
        let row = vec![self.dialect.empty.clone(); self.width()];
        self.cells.insert(index, row);
        self.touch();
        Ok(())
    }

    /// Insert an empty column before (or after) `at`. A header grid gets an
    /// empty name for the new column.
    pub fn insert_column(&mut self, at: impl Into<CellSelector>, after: bool) -> Result<()> {
        self.require_table("insert column")?;
        let (_, c) = self.locate(&CellSelector::Index(1), &at.into())?;
        let index = if after { c + 1 } else { c };
        for row in &mut self.cells {
            row.insert(index, self.dialect.empty.clone());
        }
        if self.has_headers && index <= self.headers.len() {
            self.headers.insert(index, String::new());
        }
        self.touch();
        Ok(())
    }

    /// Remove the row at `at`. Removing the only row leaves the empty grid.
    pub fn delete_row(&mut self, at: impl Into<CellSelector>) -> Result<()> {
        self.require_table("delete row")?;
        let (r, _) = self.locate(&at.into(), &CellSelector::Index(1))?;
        self.cells.remove(r);
        if self.cells.is_empty() {
            self.collapse();
        }
        self.touch();
        Ok(())
    }

    /// Remove the column at `at`. Removing the only column leaves the empty
    /// grid.
    pub fn delete_column(&mut self, at: impl Into<CellSelector>) -> Result<()> {
        self.require_table("delete column")?;
        let (_, c) = self.locate(&CellSelector::Index(1), &at.into())?;
        for row in &mut self.cells {
            row.remove(c);
        }
        if c < self.headers.len() {
            self.headers.remove(c);
        }
        if self.width() == 0 {
            self.collapse();
        }
        self.touch();
        Ok(())
    }

    fn collapse(&mut self) {
        self.cells = vec![vec![self.dialect.empty.clone()]];
        self.headers.clear();
        self.is_table = false;
    }

    /// Append a row. The grid stays a table only if the row has the
    /// table's width.
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if !row.iter().all(is_value_object) {
            return Err(Error::UnrepresentableValue);
        }
        if row.len() != self.width() {
            self.is_table = false;
        }
        self.cells.push(row);
        self.touch();
        Ok(())
    }
}

impl AsRef<[Vec<Cell>]> for Grid {
    fn as_ref(&self) -> &[Vec<Cell>] {
        &self.cells
    }
}

impl PartialEq for Grid {
    fn eq(&self, other: &Self) -> bool {
        self.is_table == other.is_table
            && self.has_headers == other.has_headers
            && self.headers == other.headers
            && self.cells == other.cells
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Grid", 3)?;
        s.serialize_field("headers", &self.headers)?;
        s.serialize_field("isTable", &self.is_table)?;
        s.serialize_field("rows", &self.cells)?;
        s.end()
    }
}
