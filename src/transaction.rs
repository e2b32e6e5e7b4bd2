use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Signed money movement recorded by an account.
/// Positive amount is a credit, negative amount is a debit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    timestamp: DateTime<Utc>,
    amount: Decimal,
}

impl Transaction {
    pub fn new(amount: Decimal) -> Self {
        Self {
            timestamp: Utc::now(),
            amount,
        }
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
