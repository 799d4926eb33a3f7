//! # Bank Accounts
//!
//! Checking and savings accounts with guarded balance operations, and a
//! SQLite-backed store that maps accounts to rows of a single table.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: Uses 2 decimal places via `rust_decimal`
//! - **Guarded mutation**: balances change only through validated operations
//! - **Explicit discriminator**: rows carry an [`AccountKind`] tag
//! - **Typed failures**: persistence errors are logged and returned, never lost
//!
//! ## Example
//!
//! ```
//! use bank_accounts::{AccountStore, BankAccount, CheckingAccount, Decimal2, StoreConfig};
//! use std::str::FromStr;
//!
//! let mut account = CheckingAccount::new(
//!     "C1",
//!     Decimal2::from_str("100.00").unwrap(),
//!     "Ana",
//!     Decimal2::from_str("50.00").unwrap(),
//! )
//! .unwrap();
//! account.withdraw(Decimal2::from_str("140").unwrap()).unwrap();
//!
//! let store = AccountStore::connect(&StoreConfig::in_memory()).unwrap();
//! store.add(&account).unwrap();
//! assert_eq!(store.get("C1").unwrap().unwrap().balance, -40.0);
//! ```

pub mod account;
pub mod command;
pub mod decimal;
pub mod error;
pub mod store;

pub use account::{
    Account, AccountInfo, AccountKind, AccountRow, BankAccount, CheckingAccount, SavingsAccount,
};
pub use command::{Command, NewAccount};
pub use decimal::Decimal2;
pub use error::{BankError, Result};
pub use store::{write_csv, AccountRecord, AccountStore, StoreConfig};
