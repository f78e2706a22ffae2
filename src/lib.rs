pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use crate::application::CsvTablesUseCase;
pub use crate::domain::error::{AppError, Result};
pub use crate::domain::ingestion_config::IngestionConfig;
pub use crate::domain::table::{
    infer_type, CellValue, ColumnSchema, ColumnType, RawRecord, RowSink, TableDescription,
    TableSummary, TypedRow,
};
pub use crate::infrastructure::config::{ConfigLoader, ConfigOverrides};
pub use crate::infrastructure::csv::CsvParser;
