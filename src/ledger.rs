use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    account::{Account, AccountError, AccountId, AccountKind},
    sink::{SinkError, TransactionSink},
};

pub const DEFAULT_CAPACITY: usize = 10;
pub const DEFAULT_FIRST_ACCOUNT_ID: AccountId = 1234567890;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerConfig {
    pub capacity: usize,
    pub first_account_id: AccountId,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            first_account_id: DEFAULT_FIRST_ACCOUNT_ID,
        }
    }
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ledger is full, cannot hold more than {capacity} accounts")]
    CapacityExceeded { capacity: usize },
    #[error("Account {0} not found")]
    AccountNotFound(AccountId),
    #[error("No account ids left to assign")]
    IdsExhausted,
    #[error("Cannot transfer from account {0} to itself")]
    SameAccount(AccountId),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
    #[error("Failed to close account {account_id}: {source}")]
    CloseFailed {
        account_id: AccountId,
        source: SinkError,
    },
}

/// Fixed capacity registry of accounts.
///
/// Ids come from a counter owned by the ledger, so they are unique and
/// strictly increasing in creation order within one ledger.
#[derive(Debug)]
pub struct Ledger {
    accounts: Vec<Account>,
    capacity: usize,
    /// `None` once the id space is used up.
    next_id: Option<AccountId>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl Ledger {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            accounts: Vec::with_capacity(config.capacity),
            capacity: config.capacity,
            next_id: Some(config.first_account_id),
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Accounts in creation order.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.iter()
    }

    pub fn create_account(
        &mut self,
        kind: AccountKind,
        opening_balance: Decimal,
    ) -> Result<&mut Account, LedgerError> {
        if self.accounts.len() >= self.capacity {
            return Err(LedgerError::CapacityExceeded {
                capacity: self.capacity,
            });
        }
        let id = self.next_id.ok_or(LedgerError::IdsExhausted)?;
        let account = Account::new(id, kind, opening_balance)?;
        // id is consumed only once the account is actually stored
        self.next_id = id.checked_add(1);
        info!(account_id = account.id(), %kind, %opening_balance, "account created");
        self.accounts.push(account);
        let idx = self.accounts.len() - 1;
        Ok(&mut self.accounts[idx])
    }

    pub fn find_account(&self, id: AccountId) -> Result<&Account, LedgerError> {
        self.accounts
            .iter()
            .find(|acc| acc.id() == id)
            .ok_or(LedgerError::AccountNotFound(id))
    }

    pub fn find_account_mut(&mut self, id: AccountId) -> Result<&mut Account, LedgerError> {
        self.accounts
            .iter_mut()
            .find(|acc| acc.id() == id)
            .ok_or(LedgerError::AccountNotFound(id))
    }

    /// Looks up both accounts and moves `amount` between them.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    ) -> Result<(), LedgerError> {
        if from == to {
            // still report unknown ids first
            self.find_account(from)?;
            return Err(LedgerError::SameAccount(from));
        }
        let from_idx = self.position(from)?;
        let to_idx = self.position(to)?;
        let (source, destination) = if from_idx < to_idx {
            let (head, tail) = self.accounts.split_at_mut(to_idx);
            (&mut head[from_idx], &mut tail[0])
        } else {
            let (head, tail) = self.accounts.split_at_mut(from_idx);
            (&mut tail[0], &mut head[to_idx])
        };
        source.transfer(destination, amount)?;
        Ok(())
    }

    /// Closes every account in registry order.
    ///
    /// Keeps going after a failure so one broken log doesn't prevent the
    /// others from being flushed; the first failure is returned.
    pub fn dispose_all(&mut self, sink: &mut impl TransactionSink) -> Result<(), LedgerError> {
        let mut first_err = None;
        for account in self.accounts.iter_mut() {
            let account_id = account.id();
            if let Err(source) = account.close(sink) {
                warn!(account_id, %source, "failed to flush transaction log");
                if first_err.is_none() {
                    first_err = Some(LedgerError::CloseFailed { account_id, source });
                }
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn position(&self, id: AccountId) -> Result<usize, LedgerError> {
        self.accounts
            .iter()
            .position(|acc| acc.id() == id)
            .ok_or(LedgerError::AccountNotFound(id))
    }
}
