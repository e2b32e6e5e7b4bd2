use thiserror::Error;

use crate::{account::AccountId, transaction::Transaction};

pub mod file_sink;
pub mod in_memory_sink;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to write transaction log: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode transaction log: {0}")]
    Csv(#[from] csv::Error),
}

/// Destination for the transaction history of a closed account.
///
/// Implementations replace whatever was stored for `account_id` before,
/// keeping `transactions` in the given (chronological) order.
pub trait TransactionSink {
    fn persist(
        &mut self,
        account_id: AccountId,
        transactions: &[Transaction],
    ) -> Result<(), SinkError>;
}
