//! Bank Accounts CLI
//!
//! Adds, reads, updates and removes accounts in a SQLite account store.
//!
//! # Usage
//!
//! ```bash
//! bank-accounts accounts.db add checking C1 100.00 Ana 50.00
//! bank-accounts accounts.db get C1
//! bank-accounts accounts.db update C1 balance=80 holder="Ana María"
//! bank-accounts accounts.db list
//! bank-accounts accounts.db remove C1
//! BANK_ACCOUNTS_DB=accounts.db bank-accounts list
//! ```
//!
//! When the first argument is a command word the database path is taken
//! from the environment.
//!
//! # Environment Variables
//!
//! - `BANK_ACCOUNTS_DB`: Database path used when none is given (default `accounts.db`)
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use bank_accounts::{write_csv, AccountStore, BankError, Command, Result, StoreConfig};
use log::debug;
use std::env;
use std::io;
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let (first, rest) = args.split_first().ok_or(BankError::MissingArgument)?;

    let (config, command_args) = if Command::is_name(first) {
        (StoreConfig::from_env(), args.as_slice())
    } else {
        (StoreConfig::new(first.as_str()), rest)
    };
    debug!("Using database {}", config.database);

    let command = Command::parse(command_args)?;
    let store = AccountStore::connect(&config)?;

    let stdout = io::stdout();
    let handle = stdout.lock();

    match command {
        Command::Add(account) => store.add(account.as_bank_account()),
        Command::Get { account_number } => {
            let record = store
                .get(&account_number)?
                .ok_or(BankError::AccountNotFound(account_number))?;
            write_csv([&record], handle)
        }
        Command::Remove { account_number } => store.remove(&account_number).map(|_| ()),
        Command::Update {
            account_number,
            balance,
            holder_name,
        } => {
            if !store.update(&account_number, balance, holder_name.as_deref())? {
                return Err(BankError::AccountNotFound(account_number));
            }
            Ok(())
        }
        Command::List => write_csv(&store.all()?, handle),
    }
}
