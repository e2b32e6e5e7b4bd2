use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::account::{AccountId, AccountKind, UnknownAccountKind};

/// Menu choices, in the order the menu lists them.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MenuAction {
    Create,
    Inspect,
    Deposit,
    Withdraw,
    Transfer,
    Check,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    Create {
        kind: AccountKind,
        opening_balance: Decimal,
    },
    Inspect {
        account: AccountId,
    },
    Deposit {
        account: AccountId,
        amount: Decimal,
    },
    Withdraw {
        account: AccountId,
        amount: Decimal,
    },
    Transfer {
        from: AccountId,
        to: AccountId,
        amount: Decimal,
    },
    CheckFormat {
        account: AccountId,
    },
    Exit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Amount is required for {action:?}")]
    AmountRequired { action: MenuAction },
    #[error("Account is required for {action:?}")]
    AccountRequired { action: MenuAction },
    #[error("Target account is required for {action:?}")]
    TargetRequired { action: MenuAction },
    #[error("Account kind is required for {action:?}")]
    KindRequired { action: MenuAction },
    #[error(transparent)]
    UnknownKind(#[from] UnknownAccountKind),
}

/// Raw menu input, every field except the action is optional.
#[derive(Debug, Clone, Default)]
pub struct RawCommand<'a> {
    pub account: Option<AccountId>,
    pub target: Option<AccountId>,
    pub amount: Option<Decimal>,
    pub kind: Option<&'a str>,
}

impl LedgerCommand {
    /// Checks that `raw` carries what `action` needs.
    ///
    /// Amount sign is not checked here, accounts own that policy.
    pub fn parse_command(action: MenuAction, raw: RawCommand<'_>) -> Result<Self, CommandError> {
        let account = || raw.account.ok_or(CommandError::AccountRequired { action });
        let amount = || raw.amount.ok_or(CommandError::AmountRequired { action });
        match action {
            MenuAction::Create => {
                let kind = raw
                    .kind
                    .filter(|kind| !kind.trim().is_empty())
                    .ok_or(CommandError::KindRequired { action })?
                    .parse::<AccountKind>()?;
                Ok(Self::Create {
                    kind,
                    opening_balance: raw.amount.unwrap_or_default(),
                })
            }
            MenuAction::Inspect => Ok(Self::Inspect {
                account: account()?,
            }),
            MenuAction::Deposit => Ok(Self::Deposit {
                account: account()?,
                amount: amount()?,
            }),
            MenuAction::Withdraw => Ok(Self::Withdraw {
                account: account()?,
                amount: amount()?,
            }),
            MenuAction::Transfer => Ok(Self::Transfer {
                from: account()?,
                to: raw.target.ok_or(CommandError::TargetRequired { action })?,
                amount: amount()?,
            }),
            MenuAction::Check => Ok(Self::CheckFormat {
                account: account()?,
            }),
            MenuAction::Exit => Ok(Self::Exit),
        }
    }
}
