use std::{fs::File, path::PathBuf};

use csv::Writer;
use tracing::debug;

use crate::{account::AccountId, transaction::Transaction};

use super::{SinkError, TransactionSink};

/// Writes one `transactions_<id>.csv` file per account into `directory`.
#[derive(Debug, Clone)]
pub struct FileSink {
    directory: PathBuf,
}

impl FileSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn path_for(&self, account_id: AccountId) -> PathBuf {
        self.directory.join(format!("transactions_{account_id}.csv"))
    }
}

impl TransactionSink for FileSink {
    fn persist(
        &mut self,
        account_id: AccountId,
        transactions: &[Transaction],
    ) -> Result<(), SinkError> {
        let path = self.path_for(account_id);
        let mut writer = Writer::from_writer(File::create(&path)?);
        if transactions.is_empty() {
            // serializer emits the header only together with the first row
            writer.write_record(["timestamp", "amount"])?;
        }
        for tx in transactions {
            writer.serialize(tx)?;
        }
        writer.flush()?;
        debug!(account_id, path = %path.display(), count = transactions.len(), "transaction log written");
        Ok(())
    }
}
