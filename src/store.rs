//! SQLite-backed persistence for accounts.
//!
//! Every operation is a single statement committed immediately. Reads hand
//! back [`AccountRecord`] values rather than live account objects.

use crate::account::{AccountKind, BankAccount};
use crate::decimal::Decimal2;
use crate::error::{BankError, Result};
use log::{debug, error, warn};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use serde::{Serialize, Serializer};
use std::env;
use std::fmt;
use std::io::Write;

/// Environment variable naming the database file for [`StoreConfig::from_env`].
pub const DATABASE_ENV_VAR: &str = "BANK_ACCOUNTS_DB";

const DEFAULT_DATABASE: &str = "accounts.db";
const IN_MEMORY: &str = ":memory:";

const SELECT_COLUMNS: &str = "SELECT account_number, balance, holder_name, account_type, \
     overdraft_limit, interest_rate FROM accounts";

/// Where the account store keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path to the SQLite file, or `":memory:"` for a private in-memory database.
    pub database: String,
}

impl StoreConfig {
    pub fn new(database: impl Into<String>) -> Self {
        StoreConfig {
            database: database.into(),
        }
    }

    pub fn in_memory() -> Self {
        StoreConfig::new(IN_MEMORY)
    }

    /// Reads `BANK_ACCOUNTS_DB`, falling back to [`StoreConfig::default`].
    pub fn from_env() -> Self {
        env::var(DATABASE_ENV_VAR)
            .map(StoreConfig::new)
            .unwrap_or_default()
    }

    fn is_in_memory(&self) -> bool {
        self.database == IN_MEMORY
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::new(DEFAULT_DATABASE)
    }
}

/// A stored account as read back from the table, numeric columns as `f64`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountRecord {
    pub account_number: String,
    #[serde(serialize_with = "two_places")]
    pub balance: f64,
    pub holder_name: String,
    pub account_type: AccountKind,
    #[serde(serialize_with = "optional_two_places")]
    pub overdraft_limit: Option<f64>,
    #[serde(serialize_with = "optional_two_places")]
    pub interest_rate: Option<f64>,
}

fn two_places<S>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format!("{:.2}", value))
}

fn optional_two_places<S>(value: &Option<f64>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(value) => two_places(value, serializer),
        None => serializer.serialize_none(),
    }
}

/// Raw column values before the discriminator is validated.
struct StoredRow {
    account_number: String,
    balance: f64,
    holder_name: String,
    account_type: String,
    overdraft_limit: Option<f64>,
    interest_rate: Option<f64>,
}

impl StoredRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(StoredRow {
            account_number: row.get(0)?,
            balance: row.get(1)?,
            holder_name: row.get(2)?,
            account_type: row.get(3)?,
            overdraft_limit: row.get(4)?,
            interest_rate: row.get(5)?,
        })
    }
}

impl TryFrom<StoredRow> for AccountRecord {
    type Error = BankError;

    fn try_from(row: StoredRow) -> Result<Self> {
        Ok(AccountRecord {
            account_type: row.account_type.parse()?,
            account_number: row.account_number,
            balance: row.balance,
            holder_name: row.holder_name,
            overdraft_limit: row.overdraft_limit,
            interest_rate: row.interest_rate,
        })
    }
}

/// Logs a database failure at error level and wraps it.
fn persistence_failure(context: impl fmt::Display) -> impl FnOnce(rusqlite::Error) -> BankError {
    move |e| {
        error!("{}: {}", context, e);
        BankError::Persistence(e)
    }
}

/// Owns one database connection and mediates all account persistence.
pub struct AccountStore {
    conn: Connection,
}

impl AccountStore {
    /// Opens the database described by `config` and creates the accounts
    /// table if it is missing.
    pub fn connect(config: &StoreConfig) -> Result<Self> {
        let opened = if config.is_in_memory() {
            Connection::open_in_memory()
        } else {
            Connection::open(&config.database)
        };

        let conn = opened.map_err(persistence_failure(format!(
            "Failed to connect to database {}",
            config.database
        )))?;

        let store = AccountStore { conn };
        store.ensure_schema()?;
        debug!("Connected to account store at {}", config.database);
        Ok(store)
    }

    /// Creates the accounts table if it does not already exist.
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS accounts (
                    account_number TEXT PRIMARY KEY,
                    balance NUMERIC(10, 2) NOT NULL,
                    holder_name TEXT NOT NULL,
                    account_type TEXT NOT NULL,
                    overdraft_limit NUMERIC(10, 2),
                    interest_rate NUMERIC(5, 2)
                )",
                [],
            )
            .map_err(persistence_failure("Failed to create accounts table"))?;

        Ok(())
    }

    /// Inserts a new row for `account`.
    ///
    /// Returns `DuplicateAccount` if the account number is already stored;
    /// the existing row is left as it was.
    pub fn add<A: BankAccount + ?Sized>(&self, account: &A) -> Result<()> {
        let row = account.to_row();

        let result = self.conn.execute(
            "INSERT INTO accounts (
                account_number, balance, holder_name, account_type, overdraft_limit, interest_rate
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                row.account_number,
                row.balance.to_string(),
                row.holder_name,
                row.kind.as_str(),
                row.overdraft_limit.map(|d| d.to_string()),
                row.interest_rate.map(|d| d.to_string()),
            ],
        );

        match result {
            Ok(_) => {
                debug!("Added {} account {}", row.kind, row.account_number);
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                warn!("Account {} already exists, not added", row.account_number);
                Err(BankError::DuplicateAccount {
                    account_number: row.account_number,
                })
            }
            Err(e) => {
                error!("Failed to add account {}: {}", row.account_number, e);
                Err(e.into())
            }
        }
    }

    /// Deletes the row for `account_number`.
    ///
    /// Returns `false` when there was nothing to delete.
    pub fn remove(&self, account_number: &str) -> Result<bool> {
        let deleted = self
            .conn
            .execute(
                "DELETE FROM accounts WHERE account_number = ?1",
                params![account_number],
            )
            .map_err(persistence_failure(format!(
                "Failed to remove account {}",
                account_number
            )))?;

        if deleted > 0 {
            debug!("Removed account {}", account_number);
        } else {
            debug!("Account {} not present, nothing removed", account_number);
        }

        Ok(deleted > 0)
    }

    /// Fetches the row for `account_number`, or `None` if it is not stored.
    pub fn get(&self, account_number: &str) -> Result<Option<AccountRecord>> {
        let sql = format!("{} WHERE account_number = ?1", SELECT_COLUMNS);
        let row = self
            .conn
            .query_row(&sql, params![account_number], StoredRow::from_row)
            .optional()
            .map_err(persistence_failure(format!(
                "Failed to read account {}",
                account_number
            )))?;

        row.map(AccountRecord::try_from).transpose()
    }

    /// Updates the balance and/or holder name of a stored account.
    ///
    /// Only the supplied fields are written. Supplying neither is rejected
    /// with `InvalidArgument`. Returns `false` if no row matched.
    pub fn update(
        &self,
        account_number: &str,
        balance: Option<Decimal2>,
        holder_name: Option<&str>,
    ) -> Result<bool> {
        let mut assignments = Vec::new();
        let mut values = Vec::new();

        if let Some(balance) = balance {
            values.push(balance.to_string());
            assignments.push(format!("balance = ?{}", values.len()));
        }
        if let Some(holder_name) = holder_name {
            values.push(holder_name.to_string());
            assignments.push(format!("holder_name = ?{}", values.len()));
        }

        if assignments.is_empty() {
            return Err(BankError::InvalidArgument(format!(
                "update of account {} names no fields",
                account_number
            )));
        }

        values.push(account_number.to_string());
        let sql = format!(
            "UPDATE accounts SET {} WHERE account_number = ?{}",
            assignments.join(", "),
            values.len()
        );

        let updated = self
            .conn
            .execute(&sql, params_from_iter(values.iter()))
            .map_err(persistence_failure(format!(
                "Failed to update account {}",
                account_number
            )))?;

        debug!("Updated {} row(s) for account {}", updated, account_number);
        Ok(updated > 0)
    }

    /// Returns every stored account, sorted by account number.
    pub fn all(&self) -> Result<Vec<AccountRecord>> {
        let sql = format!("{} ORDER BY account_number", SELECT_COLUMNS);
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(persistence_failure("Failed to list accounts"))?;
        let rows = stmt
            .query_map([], StoredRow::from_row)
            .and_then(|mapped| mapped.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(persistence_failure("Failed to list accounts"))?;

        rows.into_iter().map(AccountRecord::try_from).collect()
    }
}

/// Writes account records as CSV.
///
/// Numeric values are formatted with 2 decimal places; absent
/// variant-specific fields are left empty.
pub fn write_csv<'a, W, I>(records: I, writer: W) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a AccountRecord>,
{
    // Header written by hand so an empty listing still carries it.
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record([
        "account_number",
        "balance",
        "holder_name",
        "account_type",
        "overdraft_limit",
        "interest_rate",
    ])?;

    for record in records {
        csv_writer.serialize(record)?;
    }

    csv_writer.flush()?;
    Ok(())
}
