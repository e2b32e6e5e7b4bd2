use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{
    account::AccountId,
    capability::FormatCheck,
    command::{CommandError, LedgerCommand},
    ledger::LedgerError,
};

pub mod ledger_processor;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error(transparent)]
    LedgerErr(#[from] LedgerError),
}

/// What a successfully executed command reports back to the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Created { account: AccountId, summary: String },
    Inspected(String),
    BalanceChanged { account: AccountId, balance: Decimal },
    Transferred {
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    },
    FormatChecked(FormatCheck),
    Exited,
}

impl fmt::Display for CommandOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutcome::Created { summary, .. } => write!(f, "Created. {summary}"),
            CommandOutcome::Inspected(summary) => f.write_str(summary),
            CommandOutcome::BalanceChanged { account, balance } => {
                write!(f, "Account {account} balance: {balance}")
            }
            CommandOutcome::Transferred { from, to, amount } => {
                write!(f, "Transferred {amount} from {from} to {to}")
            }
            CommandOutcome::FormatChecked(FormatCheck::Supported(summary)) => {
                write!(f, "Object supports formatting. {summary}")
            }
            CommandOutcome::FormatChecked(FormatCheck::Unsupported) => {
                f.write_str("Object does not support formatting")
            }
            CommandOutcome::Exited => f.write_str("Goodbye"),
        }
    }
}

/// Executes menu commands against some ledger storage.
pub trait CommandProcessor {
    fn process_command(&mut self, command: LedgerCommand) -> Result<CommandOutcome, ProcessError>;

    /// Closes every account. Safe to call more than once.
    fn shutdown(&mut self) -> Result<(), ProcessError>;
}
