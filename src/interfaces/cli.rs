use std::path::PathBuf;

use clap::Parser;

use crate::infrastructure::config::{ConfigLoader, ConfigOverrides};

/// Materialize every delimited file in a directory as a typed table
#[derive(Debug, Parser)]
#[command(name = "csv-tables", version, about)]
pub struct Cli {
    /// Directory to scan (overrides config file and environment)
    #[arg(long)]
    pub path: Option<String>,

    /// Single-character field delimiter
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Maximum number of files processed at once
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Also print every row as a JSON line after its table summary
    #[arg(long)]
    pub rows: bool,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            root_path: self.path.clone(),
            delimiter: self.delimiter,
            concurrency_limit: self.concurrency,
        }
    }

    pub fn config_loader(&self) -> ConfigLoader {
        let mut loader = ConfigLoader::new();
        if let Some(file) = &self.config {
            loader = loader.with_file(file);
        }
        loader.with_env().with_overrides(&self.overrides())
    }
}
