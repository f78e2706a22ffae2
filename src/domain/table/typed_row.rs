// ============================================================
// TYPED ROW
// ============================================================
// Column-name keyed row values, in source cell order

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use super::column_type::{parse_numeric, Numeric};

/// A single cell value: a number when the cell parses as one, otherwise the raw string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Coerce a raw cell. Numeric-looking cells become numbers regardless of
    /// the column's declared type.
    pub fn from_raw(raw: &str) -> Self {
        match parse_numeric(raw) {
            Some(numeric) => numeric.into(),
            None => CellValue::Text(raw.to_string()),
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, CellValue::Text(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Numeric value widened to `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(value) => Some(*value as f64),
            CellValue::Float(value) => Some(*value),
            CellValue::Text(_) => None,
        }
    }
}

impl From<Numeric> for CellValue {
    fn from(numeric: Numeric) -> Self {
        match numeric {
            Numeric::Integer(value) => CellValue::Integer(value),
            Numeric::Float(value) => CellValue::Float(value),
        }
    }
}

/// One data record mapped onto the header.
///
/// Cells keep the positional order of the source file. Serializes as a
/// JSON object in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedRow {
    cells: Vec<(String, CellValue)>,
}

impl TypedRow {
    /// Map a record onto the header by position.
    ///
    /// The caller guarantees `record.len() == header.len()`.
    pub fn from_record(header: &[String], record: &[String]) -> Self {
        let cells = header
            .iter()
            .zip(record.iter())
            .map(|(name, raw)| (name.clone(), CellValue::from_raw(raw)))
            .collect();

        Self { cells }
    }

    /// Value for a column name. With duplicate header names the last one wins.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells
            .iter()
            .rev()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Serialize for TypedRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
