use std::fs::File;

use anyhow::{Context, Result};
use cute_bank::{
    bin_utils::{CAPACITY_ENV, Service, ledger_config},
    processor::ProcessError,
    sink::file_sink::FileSink,
};
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
    let log_dir = std::env::args().nth(2).unwrap_or_else(|| ".".to_string());
    let capacity = std::env::var(CAPACITY_ENV).ok();
    let config = ledger_config(capacity.as_deref())?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        sink: FileSink::new(log_dir),
        config,
        outcome_printer: Box::new(|_line, outcome| eprintln!("{outcome}")),
        error_printer: Box::new(|line, err| match err {
            ProcessError::CommandErr(err) => eprintln!("Error at line {line}: {err}"),
            // rejected operations are part of normal usage
            ProcessError::LedgerErr(err) => eprintln!("Line {line}: {err}"),
        }),
    };
    service.run()
}
