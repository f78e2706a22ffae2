// ============================================================
// TABLE DOMAIN LAYER
// ============================================================
// Column types, typed rows and table descriptions
// No I/O, no async beyond the row channel hand-off

mod column_type;
mod table_description;
mod typed_row;

pub use column_type::{infer_type, parse_numeric, ColumnType, Numeric};
pub use table_description::{ColumnSchema, RowSink, TableDescription, TableSummary};
pub use typed_row::{CellValue, TypedRow};

/// One decoded record: ordered string cells. Record 0 of a file is the header.
pub type RawRecord = Vec<String>;
