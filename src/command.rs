//! Command-line commands and their parsing from raw arguments.

use crate::account::{Account, AccountKind, BankAccount, CheckingAccount, SavingsAccount};
use crate::decimal::Decimal2;
use crate::error::{BankError, Result};
use std::str::FromStr;

/// A new account described on the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum NewAccount {
    Base(Account),
    Checking(CheckingAccount),
    Savings(SavingsAccount),
}

impl NewAccount {
    pub fn as_bank_account(&self) -> &dyn BankAccount {
        match self {
            NewAccount::Base(account) => account,
            NewAccount::Checking(account) => account,
            NewAccount::Savings(account) => account,
        }
    }
}

/// A parsed store command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Insert a new account row.
    Add(NewAccount),

    /// Print one account as CSV.
    Get { account_number: String },

    /// Delete an account row (no error if absent).
    Remove { account_number: String },

    /// Change balance and/or holder name.
    Update {
        account_number: String,
        balance: Option<Decimal2>,
        holder_name: Option<String>,
    },

    /// Print every account as CSV.
    List,
}

impl Command {
    /// Command words accepted by [`Command::parse`].
    pub const NAMES: [&'static str; 5] = ["add", "get", "remove", "update", "list"];

    /// Returns `true` if `arg` is one of the command words.
    pub fn is_name(arg: &str) -> bool {
        Command::NAMES.contains(&arg.trim().to_lowercase().as_str())
    }

    /// Parses a command from the arguments following the database path.
    ///
    /// ```
    /// use bank_accounts::Command;
    ///
    /// let cmd = Command::parse(&["get", "C1"]).unwrap();
    /// assert_eq!(cmd, Command::Get { account_number: "C1".to_string() });
    /// ```
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Command> {
        let args: Vec<&str> = args.iter().map(|a| a.as_ref()).collect();
        let (name, rest) = args.split_first().ok_or(BankError::MissingArgument)?;

        match name.trim().to_lowercase().as_str() {
            "add" => parse_add(rest).map(Command::Add),
            "get" => Ok(Command::Get {
                account_number: single_number(rest)?,
            }),
            "remove" => Ok(Command::Remove {
                account_number: single_number(rest)?,
            }),
            "update" => parse_update(rest),
            "list" => Ok(Command::List),
            other => Err(BankError::InvalidArgument(format!(
                "unknown command '{}'",
                other
            ))),
        }
    }
}

fn parse_add(args: &[&str]) -> Result<NewAccount> {
    let kind = AccountKind::from_str(args.first().ok_or(BankError::MissingArgument)?)?;

    let expected = match kind {
        AccountKind::Base => 4,
        AccountKind::Checking | AccountKind::Savings => 5,
    };
    if args.len() < expected {
        return Err(BankError::MissingArgument);
    }

    let number = args[1];
    let balance = parse_amount(args[2])?;
    let holder = args[3];

    let account = match kind {
        AccountKind::Base => NewAccount::Base(Account::new(number, balance, holder)?),
        AccountKind::Checking => NewAccount::Checking(CheckingAccount::new(
            number,
            balance,
            holder,
            parse_amount(args[4])?,
        )?),
        AccountKind::Savings => NewAccount::Savings(SavingsAccount::new(
            number,
            balance,
            holder,
            parse_amount(args[4])?,
        )?),
    };

    Ok(account)
}

fn parse_update(args: &[&str]) -> Result<Command> {
    let (number, fields) = args.split_first().ok_or(BankError::MissingArgument)?;

    let mut balance = None;
    let mut holder_name = None;

    for field in fields {
        match field.split_once('=') {
            Some(("balance", value)) => balance = Some(parse_amount(value)?),
            Some(("holder", value)) => holder_name = Some(value.to_string()),
            _ => {
                return Err(BankError::InvalidArgument(format!(
                    "expected balance=<amount> or holder=<name>, got '{}'",
                    field
                )))
            }
        }
    }

    Ok(Command::Update {
        account_number: number.to_string(),
        balance,
        holder_name,
    })
}

fn single_number(args: &[&str]) -> Result<String> {
    args.first()
        .map(|n| n.to_string())
        .ok_or(BankError::MissingArgument)
}

fn parse_amount(value: &str) -> Result<Decimal2> {
    Decimal2::from_str(value)
        .map_err(|e| BankError::InvalidArgument(format!("'{}' is not an amount: {}", value, e)))
}
