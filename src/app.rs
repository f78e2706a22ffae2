use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::application::CsvTablesUseCase;
use crate::domain::error::Result;
use crate::interfaces::cli::Cli;
use crate::interfaces::output::JsonLinesSink;

pub async fn run() -> ExitCode {
    let _ = dotenvy::dotenv();
    // Logs go to stderr so stdout stays machine-readable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();

    match execute(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "csv-tables failed");
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: &Cli) -> Result<()> {
    let config = cli.config_loader().load()?;
    info!(
        root = %config.root_path,
        delimiter = ?config.delimiter,
        concurrency_limit = config.concurrency_limit,
        "Starting ingestion"
    );

    let use_case = CsvTablesUseCase::new(config)?;
    let tables = use_case.run().await?;

    let stdout = std::io::stdout();
    let mut sink = JsonLinesSink::new(stdout.lock());
    for table in tables {
        sink.write_summary(&table.summary())?;
        if cli.rows {
            table.resolve(&mut sink)?;
        }
    }
    sink.flush()
}
