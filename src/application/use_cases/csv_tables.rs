//! Ingestion orchestrator
//!
//! Discovers files under the configured root, then reads, decodes and
//! builds one table per file with at most `concurrency_limit` files in
//! flight. The first failing file fails the whole run.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info};
use validator::Validate;

use crate::application::use_cases::bounded::{concurrency_slots, map_bounded};
use crate::application::use_cases::table_builder::build_table;
use crate::domain::error::{AppError, Result};
use crate::domain::ingestion_config::IngestionConfig;
use crate::domain::table::TableDescription;
use crate::infrastructure::csv::CsvParser;
use crate::infrastructure::storage::{discover_files, table_name_for};

pub struct CsvTablesUseCase {
    config: Arc<IngestionConfig>,
}

impl CsvTablesUseCase {
    /// Validates the config once; it is read-only from here on.
    pub fn new(config: IngestionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// Run one ingestion pass.
    ///
    /// Tables are returned sorted by source file path. No partial result is
    /// returned on failure; workers still in flight are aborted when the
    /// task set is dropped.
    pub async fn run(&self) -> Result<Vec<TableDescription>> {
        let root = self.config.root_path();
        let files = discover_files(root).await?;
        info!(
            root = %root.display(),
            file_count = files.len(),
            "done discovering files. Found {} files",
            files.len()
        );

        let parser = CsvParser::new().with_delimiter(self.config.delimiter_byte());
        let slots = concurrency_slots(self.config.concurrency_limit);

        let mut tables = map_bounded(files, slots, move |path| async move {
            let table = ingest_file(&parser, &path).await?;
            Ok::<_, AppError>((path, table))
        })
        .await
        .inspect_err(|err| error!(error = %err, "Ingestion run failed"))?;

        tables.sort_by(|a, b| a.0.cmp(&b.0));
        info!(table_count = tables.len(), "Ingestion run complete");

        Ok(tables.into_iter().map(|(_, table)| table).collect())
    }
}

/// Read, decode and build a single file
pub async fn ingest_file(parser: &CsvParser, path: &Path) -> Result<TableDescription> {
    let table_name = table_name_for(path)?;
    let records = parser.parse_file(path).await?;
    let table = build_table(records, &table_name).map_err(|e| match e {
        AppError::EmptyTable(msg) => AppError::EmptyTable(format!("{}: {}", path.display(), msg)),
        AppError::ParseError(msg) => AppError::ParseError(format!("{}: {}", path.display(), msg)),
        other => other,
    })?;

    debug!(
        path = %path.display(),
        table = table.name(),
        columns = table.columns().len(),
        rows = table.row_count(),
        "Built table"
    );

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::{CellValue, ColumnType, TypedRow};
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        std::fs::write(dir.path().join(name), content).unwrap();
    }

    fn use_case(dir: &TempDir, concurrency_limit: usize) -> CsvTablesUseCase {
        let config = IngestionConfig::new(dir.path().to_string_lossy())
            .with_concurrency_limit(concurrency_limit);
        CsvTablesUseCase::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_one_table_per_file() {
        let temp_dir = TempDir::new().unwrap();
        write(&temp_dir, "users.csv", "id,name\n1,alice\n2,bob\n");
        write(&temp_dir, "orders.csv", "id,total\n10,9.99\n");
        write(&temp_dir, "notes.txt", "note\nhello\n");

        for limit in [1, 2, 10_000] {
            let tables = use_case(&temp_dir, limit).run().await.unwrap();
            let names: Vec<&str> = tables.iter().map(|t| t.name()).collect();
            assert_eq!(names, vec!["notes", "orders", "users"]);
        }
    }

    #[tokio::test]
    async fn test_schema_and_rows_survive_the_run() {
        let temp_dir = TempDir::new().unwrap();
        write(&temp_dir, "orders.csv", "id,total,status\n10,9.99,paid\n11,5,open\n");

        let mut tables = use_case(&temp_dir, 4).run().await.unwrap();
        let table = tables.pop().unwrap();

        let types: Vec<ColumnType> = table.columns().iter().map(|c| c.column_type).collect();
        assert_eq!(
            types,
            vec![ColumnType::Integer, ColumnType::Float, ColumnType::Text]
        );

        let mut rows: Vec<TypedRow> = Vec::new();
        table.resolve(&mut rows).unwrap();
        assert_eq!(rows[1].get("total"), Some(&CellValue::Integer(5)));
    }

    #[tokio::test]
    async fn test_custom_delimiter() {
        let temp_dir = TempDir::new().unwrap();
        write(&temp_dir, "semi.csv", "a;b\n1;2,5\n");

        let config = IngestionConfig::new(temp_dir.path().to_string_lossy()).with_delimiter(';');
        let tables = CsvTablesUseCase::new(config).unwrap().run().await.unwrap();

        assert_eq!(tables[0].columns()[1].column_type, ColumnType::Text);
    }

    #[tokio::test]
    async fn test_malformed_file_fails_the_run() {
        let temp_dir = TempDir::new().unwrap();
        write(&temp_dir, "good.csv", "a,b\n1,2\n");
        write(&temp_dir, "bad.csv", "a,b\n\"unterminated,2\n");

        for limit in [1, 2, 100] {
            let err = use_case(&temp_dir, limit).run().await.unwrap_err();
            assert!(matches!(err, AppError::ParseError(_)));
        }
    }

    #[tokio::test]
    async fn test_empty_file_fails_the_run() {
        let temp_dir = TempDir::new().unwrap();
        write(&temp_dir, "good.csv", "a,b\n1,2\n");
        write(&temp_dir, "empty.csv", "");

        let err = use_case(&temp_dir, 2).run().await.unwrap_err();
        assert!(matches!(err, AppError::EmptyTable(_)));
    }

    #[tokio::test]
    async fn test_non_directory_root_yields_no_tables() {
        let temp_dir = TempDir::new().unwrap();
        write(&temp_dir, "single.csv", "a\n1\n");

        let config = IngestionConfig::new(temp_dir.path().join("single.csv").to_string_lossy());
        let tables = CsvTablesUseCase::new(config).unwrap().run().await.unwrap();

        assert!(tables.is_empty());
    }

    #[tokio::test]
    async fn test_unbounded_limit_runs() {
        let temp_dir = TempDir::new().unwrap();
        write(&temp_dir, "a.csv", "x\n1\n");
        write(&temp_dir, "b.csv", "y\n2\n");

        let tables = use_case(&temp_dir, usize::MAX).run().await.unwrap();
        assert_eq!(tables.len(), 2);

        let spec = format!(
            r#"{{"path": {:?}, "concurrency": 18446744073709551615}}"#,
            temp_dir.path().to_string_lossy()
        );
        let config = IngestionConfig::from_json_spec(&spec).unwrap();
        let tables = CsvTablesUseCase::new(config).unwrap().run().await.unwrap();
        assert_eq!(tables.len(), 2);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = IngestionConfig::new("/data").with_concurrency_limit(0);
        assert!(CsvTablesUseCase::new(config).is_err());
    }
}
