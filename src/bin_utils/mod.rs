//! Bootstraps [`cute_bank`](crate) for the command line: reads menu commands
//! from CSV, runs them through a [`LedgerProcessor`] and prints the final
//! state of every account as CSV.

use std::io::{Read, Write};

use crate::{
    command::{LedgerCommand, RawCommand},
    ledger::{DEFAULT_CAPACITY, LedgerConfig},
    processor::{
        CommandOutcome, CommandProcessor, ProcessError, ledger_processor::LedgerProcessor,
    },
    sink::TransactionSink,
};
use anyhow::{Context, Result};
use csv_parser::CsvCommandParser;
use csv_printer::{AccountRow, print_accounts};
pub mod csv_parser;
pub mod csv_printer;

pub const CAPACITY_ENV: &str = "CUTE_BANK_CAPACITY";

/// Ledger configuration with an optional capacity override, usually taken
/// from [`CAPACITY_ENV`].
pub fn ledger_config(capacity: Option<&str>) -> Result<LedgerConfig> {
    let capacity = match capacity {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid ledger capacity `{value}`"))?,
        None => DEFAULT_CAPACITY,
    };
    Ok(LedgerConfig {
        capacity,
        ..Default::default()
    })
}

pub struct Service<'w, R, W: 'w, S> {
    pub input: R,
    pub output: &'w mut W,
    pub sink: S,
    pub config: LedgerConfig,
    pub outcome_printer: Box<dyn FnMut(u64, &CommandOutcome)>,
    pub error_printer: Box<dyn FnMut(u64, ProcessError)>,
}

impl<'w, R, W, S> Service<'w, R, W, S>
where
    R: Read,
    W: Write + 'w,
    S: TransactionSink,
{
    pub fn run(mut self) -> Result<()> {
        let parser =
            CsvCommandParser::new(self.input).context("Failed to read command header")?;

        let mut processor = LedgerProcessor::new(self.config, self.sink);

        let mut malformed = None;
        for (line, row) in parser {
            let row = match row {
                Ok(row) => row,
                Err(err) => {
                    malformed = Some((line, err));
                    break;
                }
            };
            let raw = RawCommand {
                account: row.account,
                target: row.target,
                amount: row.amount,
                kind: row.kind.as_deref(),
            };
            let command = match LedgerCommand::parse_command(row.action, raw) {
                Ok(command) => command,
                Err(err) => {
                    (self.error_printer)(line, err.into());
                    continue;
                }
            };
            // nothing after exit runs, even when exit itself failed
            let exiting = command == LedgerCommand::Exit;
            match processor.process_command(command) {
                Ok(outcome) => (self.outcome_printer)(line, &outcome),
                Err(err) => (self.error_printer)(line, err),
            }
            if exiting {
                break;
            }
        }

        // input may end without an explicit exit, or stop at a bad row;
        // either way the accounts seen so far get flushed
        processor
            .shutdown()
            .context("Failed to flush transaction logs")?;

        if let Some((line, err)) = malformed {
            return Err(anyhow::Error::new(err).context(format!("Malformed command at line {line}")));
        }

        print_accounts(
            self.output,
            processor.ledger.accounts().map(|acc| AccountRow {
                account: acc.id(),
                kind: acc.kind(),
                balance: acc.balance(),
                closed: acc.is_closed(),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_override() {
        assert_eq!(ledger_config(None).unwrap(), LedgerConfig::default());
        assert_eq!(ledger_config(Some(" 3 ")).unwrap().capacity, 3);
        let err = ledger_config(Some("many")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid ledger capacity `many`");
    }
}
