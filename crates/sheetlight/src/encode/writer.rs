use crate::encode::primitives::{escape_and_quote_into, is_bare, write_cell_text};
use crate::options::Dialect;
use crate::value::Cell;

/// Accumulates dialect-formatted rows. Line breaks separate rows. Only a
/// last row that wrote no text is followed by one, since a bare trailing
/// break is read as the end of the previous row.
pub struct RowWriter<'d> {
    dialect: &'d Dialect,
    out: String,
    scratch: String,
    rows: usize,
    /// The most recent data row produced no text.
    blank_tail: bool,
}

impl<'d> RowWriter<'d> {
    pub fn new(dialect: &'d Dialect) -> Self {
        Self {
            dialect,
            out: String::new(),
            scratch: String::new(),
            rows: 0,
            blank_tail: false,
        }
    }

    fn begin_row(&mut self) {
        if self.rows > 0 {
            self.out.push_str(&self.dialect.line_break);
        }
        self.rows += 1;
    }

    fn write_cell(&mut self, cell: &Cell) {
        self.scratch.clear();
        write_cell_text(&mut self.scratch, cell);
        if is_bare(cell, self.dialect) {
            self.out.push_str(&self.scratch);
        } else {
            escape_and_quote_into(&mut self.out, &self.scratch, &self.dialect.quote);
        }
    }

    pub fn header_row(&mut self, names: &[String]) {
        self.begin_row();
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.out.push_str(&self.dialect.delimiter);
            }
            escape_and_quote_into(&mut self.out, name, &self.dialect.quote);
        }
    }

    pub fn row(&mut self, cells: &[Cell]) {
        self.begin_row();
        let start = self.out.len();
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                self.out.push_str(&self.dialect.delimiter);
            }
            self.write_cell(cell);
        }
        self.blank_tail = self.out.len() == start;
    }

    pub fn into_string(mut self) -> String {
        if self.blank_tail {
            self.out.push_str(&self.dialect.line_break);
        }
        self.out
    }
}
