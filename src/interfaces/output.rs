use std::io::Write;

use serde::Serialize;

use crate::domain::error::{AppError, Result};
use crate::domain::table::{RowSink, TableSummary, TypedRow};

/// Writes table summaries and rows as one JSON document per line
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn write_summary(&mut self, summary: &TableSummary) -> Result<()> {
        self.write_line(&serde_json::json!({ "table": summary }))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line<T: Serialize>(&mut self, value: &T) -> Result<()> {
        serde_json::to_writer(&mut self.writer, value)
            .map_err(|e| AppError::Internal(format!("Failed to encode output: {}", e)))?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> RowSink for JsonLinesSink<W> {
    fn write(&mut self, row: TypedRow) -> Result<()> {
        self.write_line(&row)
    }
}
