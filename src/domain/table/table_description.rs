// ============================================================
// TABLE DESCRIPTION
// ============================================================
// Schema plus row source handed to the host, one per file

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use super::{CellValue, ColumnType, TypedRow};
use crate::domain::error::Result;

/// A named, typed column. Position matches the header cell it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,

    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
        }
    }

    /// Resolve this column's value out of a row
    pub fn resolve<'a>(&self, row: &'a TypedRow) -> Option<&'a CellValue> {
        row.get(&self.name)
    }
}

/// Receives rows pushed by [`TableDescription::resolve`], in order
pub trait RowSink {
    fn write(&mut self, row: TypedRow) -> Result<()>;
}

impl RowSink for Vec<TypedRow> {
    fn write(&mut self, row: TypedRow) -> Result<()> {
        self.push(row);
        Ok(())
    }
}

/// Host-facing summary of a table, without its rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSummary {
    pub name: String,
    pub columns: Vec<ColumnSchema>,
    pub row_count: usize,
}

/// One file materialized as a table.
///
/// Never mutated after construction. Rows are handed out once: both
/// [`resolve`](Self::resolve) and [`stream`](Self::stream) consume the table.
#[derive(Debug)]
pub struct TableDescription {
    name: String,
    columns: Vec<ColumnSchema>,
    rows: Vec<TypedRow>,
}

impl TableDescription {
    pub fn new(name: impl Into<String>, columns: Vec<ColumnSchema>, rows: Vec<TypedRow>) -> Self {
        Self {
            name: name.into(),
            columns,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&ColumnSchema> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn summary(&self) -> TableSummary {
        TableSummary {
            name: self.name.clone(),
            columns: self.columns.clone(),
            row_count: self.rows.len(),
        }
    }

    /// Push every row into the sink synchronously, in file order.
    /// Returns the number of rows written.
    pub fn resolve<S: RowSink + ?Sized>(self, sink: &mut S) -> Result<usize> {
        let mut written = 0;
        for row in self.rows {
            sink.write(row)?;
            written += 1;
        }
        Ok(written)
    }

    /// Send rows over a bounded channel, waiting for capacity before each one.
    ///
    /// Stops as soon as the receiver is dropped. Returns the number of rows delivered.
    pub async fn stream(self, tx: mpsc::Sender<TypedRow>) -> usize {
        let mut delivered = 0;
        for row in self.rows {
            if tx.send(row).await.is_err() {
                break;
            }
            delivered += 1;
        }
        delivered
    }
}
