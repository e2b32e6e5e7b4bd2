use std::collections::HashMap;

use crate::{account::AccountId, transaction::Transaction};

use super::{SinkError, TransactionSink};

#[derive(Debug, Default)]
pub struct InMemorySink {
    pub logs: HashMap<AccountId, Vec<Transaction>>,
    /// How many times anything was persisted, overwrites included.
    pub writes: usize,
}

impl InMemorySink {
    pub fn log(&self, account_id: AccountId) -> Option<&[Transaction]> {
        self.logs.get(&account_id).map(Vec::as_slice)
    }
}

impl TransactionSink for InMemorySink {
    fn persist(
        &mut self,
        account_id: AccountId,
        transactions: &[Transaction],
    ) -> Result<(), SinkError> {
        self.logs.insert(account_id, transactions.to_vec());
        self.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn persist_overwrites_previous_log() {
        let mut sink = InMemorySink::default();
        sink.persist(7, &[Transaction::new(dec!(1)), Transaction::new(dec!(-1))])
            .unwrap();
        sink.persist(7, &[Transaction::new(dec!(5))]).unwrap();

        let log = sink.log(7).unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].amount(), dec!(5));
        assert_eq!(sink.writes, 2);
        assert!(sink.log(8).is_none());
    }
}
