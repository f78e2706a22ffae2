// ============================================================
// INGESTION CONFIGURATION
// ============================================================
// Immutable settings for one ingestion run

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::error::{AppError, Result};

pub const DEFAULT_DELIMITER: char = ',';
pub const DEFAULT_CONCURRENCY_LIMIT: usize = 10_000;

/// Configuration for one ingestion run.
///
/// Accepts both snake_case keys and the camelCase keys of the host's plugin
/// spec (`path`, `csvDelimiter`, `concurrency`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct IngestionConfig {
    /// Directory to scan for delimited files
    #[serde(alias = "path", alias = "rootPath")]
    #[validate(length(min = 1, message = "root_path must not be empty"))]
    pub root_path: String,

    /// Single-character field delimiter (default: comma)
    #[serde(
        default = "default_delimiter",
        alias = "csvDelimiter",
        alias = "csv_delimiter"
    )]
    #[validate(custom(function = "validate_delimiter"))]
    pub delimiter: char,

    /// Maximum number of files processed at the same time (default: 10000)
    #[serde(
        default = "default_concurrency_limit",
        alias = "concurrency",
        alias = "concurrencyLimit"
    )]
    #[validate(range(min = 1, message = "concurrency_limit must be >= 1"))]
    pub concurrency_limit: usize,
}

fn default_delimiter() -> char {
    DEFAULT_DELIMITER
}

fn default_concurrency_limit() -> usize {
    DEFAULT_CONCURRENCY_LIMIT
}

fn validate_delimiter(delimiter: &char) -> std::result::Result<(), ValidationError> {
    // The decoder splits on a single byte
    if !delimiter.is_ascii() {
        let mut err = ValidationError::new("delimiter_not_ascii");
        err.message = Some("delimiter must be a single ASCII character".into());
        return Err(err);
    }
    if *delimiter == '"' || *delimiter == '\n' || *delimiter == '\r' {
        let mut err = ValidationError::new("delimiter_reserved");
        err.message = Some("delimiter cannot be a quote or line terminator".into());
        return Err(err);
    }
    Ok(())
}

impl IngestionConfig {
    /// Create a config with default delimiter and concurrency
    pub fn new(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            delimiter: DEFAULT_DELIMITER,
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
        }
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_concurrency_limit(mut self, concurrency_limit: usize) -> Self {
        self.concurrency_limit = concurrency_limit;
        self
    }

    /// Parse and validate the host's JSON plugin spec
    pub fn from_json_spec(spec: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(spec)
            .map_err(|e| AppError::ConfigError(format!("Invalid spec: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn root_path(&self) -> &Path {
        Path::new(&self.root_path)
    }

    /// Delimiter as the byte the decoder splits on. Only meaningful after validation.
    pub fn delimiter_byte(&self) -> u8 {
        self.delimiter as u8
    }
}
