//! Error types for accounts and the account store.

use crate::decimal::Decimal2;
use thiserror::Error;

/// Result type alias for account and store operations
pub type Result<T> = std::result::Result<T, BankError>;

/// Errors that can occur while operating on accounts or the store.
#[derive(Error, Debug)]
pub enum BankError {
    /// Non-positive amount or insufficient funds
    #[error("Invalid amount {amount}: {reason}")]
    InvalidAmount {
        amount: Decimal2,
        reason: &'static str,
    },

    /// Account number already present in the store
    #[error("Account number {account_number} already exists")]
    DuplicateAccount { account_number: String },

    /// Any other database failure
    #[error("Persistence failure: {0}")]
    Persistence(#[from] rusqlite::Error),

    /// Caller supplied arguments that cannot form a valid request
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Stored discriminator does not name a known account type
    #[error("Unknown account type '{0}' in storage")]
    UnknownAccountType(String),

    /// Account lookup found no row
    #[error("Account {0} not found")]
    AccountNotFound(String),

    /// Failed to write output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Missing command-line arguments
    #[error("Missing arguments. Usage: bank-accounts [database] <add|get|remove|update|list> [args...]")]
    MissingArgument,
}

impl BankError {
    pub(crate) fn invalid_amount(amount: Decimal2, reason: &'static str) -> Self {
        BankError::InvalidAmount { amount, reason }
    }
}
