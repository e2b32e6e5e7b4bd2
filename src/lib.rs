/// Immutable signed money movements.
pub mod transaction;

/// Account balance and history management, plus the account lifecycle
/// (active until closed, closing flushes the history to a sink).
pub mod account;

/// Fixed capacity account registry that owns id assignment.
pub mod ledger;

/// Format capability probe over the closed set of ledger objects.
pub mod capability;

/// Where transaction histories go when accounts are closed.
pub mod sink;

/// Menu commands, validated before they reach the ledger.
pub mod command;

/// Command processor interface, plus implementation backed by [`ledger::Ledger`].
pub mod processor;

/// CSV in, CSV out. Kept in the library so integration tests can drive it.
pub mod bin_utils;
