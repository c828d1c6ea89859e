use core::fmt;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::number::format_number;

#[derive(Debug, Clone, Copy)]
pub enum Number {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl Number {
    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::I64(i) => i as f64,
            Number::U64(u) => u as f64,
            Number::F64(f) => f,
        }
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Number::F64(f) => f.is_finite(),
            _ => true,
        }
    }
}

// Integers compare exactly across signedness; anything involving a float
// compares as f64.
impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (*self, *other) {
            (Number::I64(a), Number::I64(b)) => a == b,
            (Number::U64(a), Number::U64(b)) => a == b,
            (Number::I64(a), Number::U64(b)) | (Number::U64(b), Number::I64(a)) => {
                i128::from(a) == i128::from(b)
            }
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_number(self))
    }
}

/// One grid cell.
///
/// `Empty` is the marker stored for a cell with no content; it is distinct
/// from an empty string. `Array` and `Object` hold embedded JSON literals.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Cell>),
    Object(Vec<(String, Cell)>),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Cell::Empty | Cell::Null | Cell::Bool(_) | Cell::Number(_) | Cell::String(_)
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Cell::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Lossy conversion to JSON: the empty marker becomes `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as J;
        match self {
            Cell::Empty | Cell::Null => J::Null,
            Cell::Bool(b) => J::Bool(*b),
            Cell::Number(Number::I64(i)) => J::from(*i),
            Cell::Number(Number::U64(u)) => J::from(*u),
            Cell::Number(Number::F64(f)) => serde_json::Number::from_f64(*f)
                .map(J::Number)
                .unwrap_or(J::Null),
            Cell::String(s) => J::String(s.clone()),
            Cell::Array(items) => J::Array(items.iter().map(Cell::to_json).collect()),
            Cell::Object(entries) => J::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }
}

/// Whether `value` can be stored in a grid and written back as text.
///
/// Numbers must be finite, and the empty marker is only meaningful as a
/// whole cell, never nested inside an embedded array or object.
pub fn is_value_object(value: &Cell) -> bool {
    match value {
        Cell::Empty => true,
        nested => is_nested_value(nested),
    }
}

fn is_nested_value(value: &Cell) -> bool {
    match value {
        Cell::Empty => false,
        Cell::Null | Cell::Bool(_) | Cell::String(_) => true,
        Cell::Number(n) => n.is_finite(),
        Cell::Array(items) => items.iter().all(is_nested_value),
        Cell::Object(entries) => entries.iter().all(|(_, v)| is_nested_value(v)),
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        crate::encode::primitives::write_cell_text(&mut out, self);
        f.write_str(&out)
    }
}

impl From<serde_json::Value> for Cell {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as J;
        match value {
            J::Null => Cell::Null,
            J::Bool(b) => Cell::Bool(b),
            J::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Cell::Number(Number::U64(u))
                } else if let Some(i) = n.as_i64() {
                    Cell::Number(Number::I64(i))
                } else {
                    Cell::Number(Number::F64(n.as_f64().unwrap_or(f64::NAN)))
                }
            }
            J::String(s) => Cell::String(s),
            J::Array(items) => Cell::Array(items.into_iter().map(Cell::from).collect()),
            J::Object(map) => Cell::Object(map.into_iter().map(|(k, v)| (k, Cell::from(v))).collect()),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::String(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::String(s)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

impl From<i64> for Cell {
    fn from(i: i64) -> Self {
        Cell::Number(Number::I64(i))
    }
}

impl From<i32> for Cell {
    fn from(i: i32) -> Self {
        Cell::Number(Number::I64(i64::from(i)))
    }
}

impl From<u64> for Cell {
    fn from(u: u64) -> Self {
        Cell::Number(Number::U64(u))
    }
}

impl From<f64> for Cell {
    fn from(f: f64) -> Self {
        Cell::Number(Number::F64(f))
    }
}

impl From<Number> for Cell {
    fn from(n: Number) -> Self {
        Cell::Number(n)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Null, Into::into)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Empty | Cell::Null => serializer.serialize_unit(),
            Cell::Bool(b) => serializer.serialize_bool(*b),
            Cell::Number(Number::I64(i)) => serializer.serialize_i64(*i),
            Cell::Number(Number::U64(u)) => serializer.serialize_u64(*u),
            Cell::Number(Number::F64(f)) => serializer.serialize_f64(*f),
            Cell::String(s) => serializer.serialize_str(s),
            Cell::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Cell::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Cell::from)
    }
}
