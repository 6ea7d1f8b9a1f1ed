use std::fs::File;

use anyhow::{Context, Result};
use bank_ledger::{bin_utils::Service, engine::AccrualConfig, simulation::ProcessError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let filename = std::env::args()
        .nth(1)
        .context("Expected a file name as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        config: AccrualConfig::default(),
        error_printer: Box::new(|line, err| match err {
            ProcessError::ParseErr(err) => eprintln!("Error at line {line}: {err}"),
            ProcessError::CommandErr(err) => eprintln!("Error at line {line}: {err}"),
            // ledger rule violations are already logged by the service
            ProcessError::TransactionErr(_) | ProcessError::AccrualErr(_) => {}
        }),
    };
    service.run()
}
