use crate::{account::Account, transaction::Transaction};

/// Every ledger object the menu can hand over for a format probe.
#[derive(Debug, Clone, Copy)]
pub enum Inspectable<'a> {
    Account(&'a Account),
    Transaction(&'a Transaction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatCheck {
    Supported(String),
    Unsupported,
}

/// Reports whether `obj` can format itself and, if so, renders it.
pub fn check_format(obj: Inspectable<'_>) -> FormatCheck {
    match obj {
        Inspectable::Account(account) => FormatCheck::Supported(account.format()),
        Inspectable::Transaction(_) => FormatCheck::Unsupported,
    }
}
