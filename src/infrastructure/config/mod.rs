use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::error::Result;
use crate::domain::ingestion_config::{
    IngestionConfig, DEFAULT_CONCURRENCY_LIMIT, DEFAULT_DELIMITER,
};

pub const ENV_PREFIX: &str = "CSV_TABLES_";

/// Explicit values that win over every other source, e.g. CLI flags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency_limit: Option<usize>,
}

/// Layered config: defaults, optional TOML file, `CSV_TABLES_*` env vars, overrides.
/// Later layers win.
pub struct ConfigLoader {
    figment: Figment,
}

impl ConfigLoader {
    pub fn new() -> Self {
        let figment = Figment::new()
            .merge(Serialized::default("delimiter", DEFAULT_DELIMITER))
            .merge(Serialized::default(
                "concurrency_limit",
                DEFAULT_CONCURRENCY_LIMIT,
            ));
        Self { figment }
    }

    pub fn with_file(mut self, path: &Path) -> Self {
        self.figment = self.figment.merge(Toml::file(path));
        self
    }

    pub fn with_env(mut self) -> Self {
        self.figment = self.figment.merge(Env::prefixed(ENV_PREFIX));
        self
    }

    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        self.figment = self.figment.merge(Serialized::defaults(overrides));
        self
    }

    /// Extract and validate the merged configuration
    pub fn load(&self) -> Result<IngestionConfig> {
        let config: IngestionConfig = self.figment.extract()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_with_override_path() {
        let overrides = ConfigOverrides {
            root_path: Some("/data".to_string()),
            ..Default::default()
        };
        let config = ConfigLoader::new().with_overrides(&overrides).load().unwrap();

        assert_eq!(config, IngestionConfig::new("/data"));
    }

    #[test]
    fn test_file_then_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("tables.toml");
        std::fs::write(
            &file,
            "root_path = \"/from/file\"\ndelimiter = \";\"\nconcurrency_limit = 3\n",
        )
        .unwrap();

        let overrides = ConfigOverrides {
            concurrency_limit: Some(8),
            ..Default::default()
        };
        let config = ConfigLoader::new()
            .with_file(&file)
            .with_overrides(&overrides)
            .load()
            .unwrap();

        assert_eq!(config.root_path, "/from/file");
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.concurrency_limit, 8);
    }

    #[test]
    fn test_missing_root_path_is_config_error() {
        let err = ConfigLoader::new().load().unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }

    #[test]
    fn test_zero_concurrency_is_validation_error() {
        let overrides = ConfigOverrides {
            root_path: Some("/data".to_string()),
            concurrency_limit: Some(0),
            ..Default::default()
        };
        let err = ConfigLoader::new().with_overrides(&overrides).load().unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
