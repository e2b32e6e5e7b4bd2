use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    sink::{SinkError, TransactionSink},
    transaction::Transaction,
};

pub type AccountId = u64;

/// Pure classification, no behavioral differences between kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Savings,
    Checking,
    Credit,
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AccountKind::Savings => "Savings",
            AccountKind::Checking => "Checking",
            AccountKind::Credit => "Credit",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown account kind `{0}`")]
pub struct UnknownAccountKind(pub String);

impl FromStr for AccountKind {
    type Err = UnknownAccountKind;

    /// Accepts kind names as well as menu codes `0`, `1` and `2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "0" | "savings" => Ok(AccountKind::Savings),
            "1" | "checking" => Ok(AccountKind::Checking),
            "2" | "credit" => Ok(AccountKind::Credit),
            other => Err(UnknownAccountKind(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Account {0} is closed, no further operations are allowed")]
    AccountClosed(AccountId),
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("Opening balance must not be negative, got {0}")]
    NegativeOpeningBalance(Decimal),
    #[error("Crediting {amount} to account {account} would overflow its balance")]
    BalanceOverflow { account: AccountId, amount: Decimal },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccountState {
    Active,
    Closed,
}

#[derive(Debug)]
pub struct Account {
    id: AccountId,
    kind: AccountKind,
    opening_balance: Decimal,
    balance: Decimal,
    history: Vec<Transaction>,
    state: AccountState,
}

impl Account {
    pub fn new(
        id: AccountId,
        kind: AccountKind,
        opening_balance: Decimal,
    ) -> Result<Self, AccountError> {
        if opening_balance < Decimal::ZERO {
            return Err(AccountError::NegativeOpeningBalance(opening_balance));
        }
        Ok(Self {
            id,
            kind,
            opening_balance,
            balance: opening_balance,
            history: Vec::new(),
            state: AccountState::Active,
        })
    }

    pub fn id(&self) -> AccountId {
        self.id
    }

    pub fn kind(&self) -> AccountKind {
        self.kind
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn opening_balance(&self) -> Decimal {
        self.opening_balance
    }

    /// Transactions in the order they were recorded.
    pub fn history(&self) -> &[Transaction] {
        &self.history
    }

    pub fn is_closed(&self) -> bool {
        self.state == AccountState::Closed
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        self.ensure_active()?;
        ensure_positive(amount)?;
        let balance = self.credited_balance(amount)?;
        self.record(amount, balance);
        debug!(account_id = self.id, %amount, balance = %self.balance, "deposited");
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        let balance = self.debited_balance(amount)?;
        self.record(-amount, balance);
        debug!(account_id = self.id, %amount, balance = %self.balance, "withdrawn");
        Ok(())
    }

    /// Moves `amount` from this account to `destination`.
    ///
    /// Every check happens before either side is touched, so a failed
    /// transfer leaves both accounts unchanged and a successful one debits
    /// and credits together.
    pub fn transfer(
        &mut self,
        destination: &mut Account,
        amount: Decimal,
    ) -> Result<(), AccountError> {
        destination.ensure_active()?;
        let source_balance = self.debited_balance(amount)?;
        let destination_balance = destination.credited_balance(amount)?;
        self.record(-amount, source_balance);
        destination.record(amount, destination_balance);
        debug!(
            from = self.id,
            to = destination.id,
            %amount,
            "transferred"
        );
        Ok(())
    }

    /// One line summary of id, kind and balance.
    pub fn format(&self) -> String {
        self.to_string()
    }

    /// Flushes the history to `sink` and closes the account.
    ///
    /// Closing an already closed account is a no-op. If the sink fails the
    /// account stays active.
    pub fn close(&mut self, sink: &mut impl TransactionSink) -> Result<(), SinkError> {
        if self.is_closed() {
            return Ok(());
        }
        sink.persist(self.id, &self.history)?;
        self.state = AccountState::Closed;
        info!(account_id = self.id, transactions = self.history.len(), "account closed");
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), AccountError> {
        match self.state {
            AccountState::Active => Ok(()),
            AccountState::Closed => Err(AccountError::AccountClosed(self.id)),
        }
    }

    /// Balance after withdrawing `amount`, without touching the account.
    fn debited_balance(&self, amount: Decimal) -> Result<Decimal, AccountError> {
        self.ensure_active()?;
        ensure_positive(amount)?;
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        // 0 < amount <= balance, cannot underflow
        Ok(self.balance - amount)
    }

    /// Balance after crediting `amount`, without touching the account.
    fn credited_balance(&self, amount: Decimal) -> Result<Decimal, AccountError> {
        self.balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow {
                account: self.id,
                amount,
            })
    }

    // only called with a balance computed by the two methods above
    fn record(&mut self, amount: Decimal, balance: Decimal) {
        self.balance = balance;
        self.history.push(Transaction::new(amount));
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Account: {}, type: {}, balance: {}",
            self.id, self.kind, self.balance
        )
    }
}

fn ensure_positive(amount: Decimal) -> Result<(), AccountError> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(AccountError::NonPositiveAmount(amount))
    }
}
