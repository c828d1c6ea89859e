#![no_main]
use libfuzzer_sys::fuzz_target;
use arbitrary::{Arbitrary, Unstructured};
use sheetlight::{Cell, Dialect, Number, parse_with, stringify_with};

const MAX_ROWS: usize = 12;
const MAX_COLUMNS: usize = 8;

#[derive(Arbitrary, Debug)]
enum FuzzCell {
    Empty,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    List(Vec<u8>),
}

impl FuzzCell {
    fn into_cell(self) -> Cell {
        match self {
            FuzzCell::Empty => Cell::Empty,
            FuzzCell::Null => Cell::Null,
            FuzzCell::Bool(b) => Cell::Bool(b),
            FuzzCell::Int(i) => Cell::Number(Number::I64(i)),
            FuzzCell::Float(f) if f.is_finite() => Cell::Number(Number::F64(f)),
            FuzzCell::Float(_) => Cell::Null,
            FuzzCell::Text(s) => Cell::String(s),
            FuzzCell::List(items) => {
                Cell::Array(items.into_iter().map(|b| Cell::from(u64::from(b))).collect())
            }
        }
    }
}

fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(rows) = u.int_in_range(1..=MAX_ROWS) else { return };
    let Ok(columns) = u.int_in_range(1..=MAX_COLUMNS) else { return };
    let mut grid = Vec::with_capacity(rows);
    for _ in 0..rows {
        let mut row = Vec::with_capacity(columns);
        for _ in 0..columns {
            let Ok(cell) = FuzzCell::arbitrary(&mut u) else { return };
            row.push(cell.into_cell());
        }
        grid.push(row);
    }

    let d = Dialect::default().with_memoize(false);
    let text = match stringify_with(&grid, &d) {
        Ok(text) => text,
        Err(e) => panic!("stringify rejected representable rows: {e}\nRows: {grid:?}"),
    };
    match parse_with(&text, &d) {
        Ok(parsed) => {
            if parsed.to_array() != grid {
                panic!("Roundtrip mismatch!\nRows: {grid:?}\nText: {text:?}\nParsed: {:?}", parsed.to_array());
            }
        }
        Err(e) => panic!("Failed to parse stringified rows!\nRows: {grid:?}\nText: {text:?}\nError: {e}"),
    }
});
