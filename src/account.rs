//! Account model: the base account plus checking and savings variants.
//!
//! The balance only ever changes through [`Account::adjust_balance`], which
//! the guarded mutators (`deposit`, `withdraw`, `apply_interest`) call once
//! their checks have passed. A failed operation leaves the balance untouched.

use crate::decimal::Decimal2;
use crate::error::{BankError, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Discriminator stored alongside each row so the shared table can tell
/// account variants apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    Base,
    Checking,
    Savings,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Base => "base",
            AccountKind::Checking => "checking",
            AccountKind::Savings => "savings",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountKind {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "base" => Ok(AccountKind::Base),
            "checking" => Ok(AccountKind::Checking),
            "savings" => Ok(AccountKind::Savings),
            other => Err(BankError::UnknownAccountType(other.to_string())),
        }
    }
}

/// Flat snapshot of an account's current state, numeric fields as `f64`.
///
/// Variant-specific fields are `None` for accounts that do not carry them.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountInfo {
    pub account_number: String,
    pub balance: f64,
    pub holder_name: String,
    pub overdraft_limit: Option<f64>,
    pub interest_rate: Option<f64>,
}

/// Everything needed to write one row of the accounts table.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountRow {
    pub account_number: String,
    pub balance: Decimal2,
    pub holder_name: String,
    pub kind: AccountKind,
    pub overdraft_limit: Option<Decimal2>,
    pub interest_rate: Option<Decimal2>,
}

/// Base account state shared by every variant.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    account_number: String,
    balance: Decimal2,
    holder_name: String,
}

impl Account {
    /// Opens an account. The opening balance may not be negative.
    pub fn new(
        account_number: impl Into<String>,
        balance: Decimal2,
        holder_name: impl Into<String>,
    ) -> Result<Self> {
        if balance.is_negative() {
            return Err(BankError::invalid_amount(
                balance,
                "opening balance cannot be negative",
            ));
        }

        Ok(Account {
            account_number: account_number.into(),
            balance,
            holder_name: holder_name.into(),
        })
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn balance(&self) -> Decimal2 {
        self.balance
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    /// Applies a signed change to the balance. Callers validate first.
    ///
    /// Fails with `InvalidAmount`, leaving the balance as it was, if the
    /// result does not fit.
    pub(crate) fn adjust_balance(&mut self, delta: Decimal2) -> Result<()> {
        self.balance = self
            .balance
            .checked_add(delta)
            .ok_or_else(|| BankError::invalid_amount(delta, "balance overflow"))?;
        Ok(())
    }

    /// Withdraws `amount` if it is positive and does not exceed
    /// `balance + headroom`.
    pub(crate) fn withdraw_within(&mut self, amount: Decimal2, headroom: Decimal2) -> Result<()> {
        if !amount.is_positive() {
            return Err(BankError::invalid_amount(
                amount,
                "withdrawal amount must be positive",
            ));
        }

        // A sum past the representable range always covers the amount.
        let available = self.balance.checked_add(headroom);
        if available.is_some_and(|available| amount > available) {
            return Err(BankError::invalid_amount(amount, "insufficient funds"));
        }

        self.adjust_balance(-amount)
    }

    fn base_row(&self, kind: AccountKind) -> AccountRow {
        AccountRow {
            account_number: self.account_number.clone(),
            balance: self.balance,
            holder_name: self.holder_name.clone(),
            kind,
            overdraft_limit: None,
            interest_rate: None,
        }
    }
}

/// Behaviour shared by all account variants.
///
/// Implementors expose their base [`Account`] and describe their own row;
/// everything else has a default that variants override where their rules
/// differ.
pub trait BankAccount {
    fn base(&self) -> &Account;

    fn base_mut(&mut self) -> &mut Account;

    fn kind(&self) -> AccountKind;

    /// Full storage row, including `None` for fields this variant lacks.
    fn to_row(&self) -> AccountRow;

    fn account_number(&self) -> &str {
        self.base().account_number()
    }

    fn balance(&self) -> Decimal2 {
        self.base().balance()
    }

    fn holder_name(&self) -> &str {
        self.base().holder_name()
    }

    /// Credits the account. Fails with `InvalidAmount` if `amount <= 0`.
    fn deposit(&mut self, amount: Decimal2) -> Result<()> {
        if !amount.is_positive() {
            return Err(BankError::invalid_amount(
                amount,
                "deposit amount must be positive",
            ));
        }

        self.base_mut().adjust_balance(amount)
    }

    /// Debits the account. Fails with `InvalidAmount` if `amount <= 0` or
    /// exceeds the balance.
    fn withdraw(&mut self, amount: Decimal2) -> Result<()> {
        self.base_mut().withdraw_within(amount, Decimal2::ZERO)
    }

    fn info(&self) -> AccountInfo {
        let row = self.to_row();
        AccountInfo {
            account_number: row.account_number,
            balance: row.balance.to_f64(),
            holder_name: row.holder_name,
            overdraft_limit: row.overdraft_limit.map(|d| d.to_f64()),
            interest_rate: row.interest_rate.map(|d| d.to_f64()),
        }
    }
}

impl BankAccount for Account {
    fn base(&self) -> &Account {
        self
    }

    fn base_mut(&mut self) -> &mut Account {
        self
    }

    fn kind(&self) -> AccountKind {
        AccountKind::Base
    }

    fn to_row(&self) -> AccountRow {
        self.base_row(self.kind())
    }
}

/// Account that may be overdrawn down to `-overdraft_limit`.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckingAccount {
    account: Account,
    overdraft_limit: Decimal2,
}

impl CheckingAccount {
    pub fn new(
        account_number: impl Into<String>,
        balance: Decimal2,
        holder_name: impl Into<String>,
        overdraft_limit: Decimal2,
    ) -> Result<Self> {
        if overdraft_limit.is_negative() {
            return Err(BankError::invalid_amount(
                overdraft_limit,
                "overdraft limit cannot be negative",
            ));
        }

        Ok(CheckingAccount {
            account: Account::new(account_number, balance, holder_name)?,
            overdraft_limit,
        })
    }

    pub fn overdraft_limit(&self) -> Decimal2 {
        self.overdraft_limit
    }
}

impl BankAccount for CheckingAccount {
    fn base(&self) -> &Account {
        &self.account
    }

    fn base_mut(&mut self) -> &mut Account {
        &mut self.account
    }

    fn kind(&self) -> AccountKind {
        AccountKind::Checking
    }

    fn to_row(&self) -> AccountRow {
        AccountRow {
            overdraft_limit: Some(self.overdraft_limit),
            ..self.account.base_row(self.kind())
        }
    }

    /// Allows the balance to go negative, but never below `-overdraft_limit`.
    fn withdraw(&mut self, amount: Decimal2) -> Result<()> {
        self.account.withdraw_within(amount, self.overdraft_limit)
    }
}

/// Account that accrues interest at a fixed percentage rate.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsAccount {
    account: Account,
    interest_rate: Decimal2,
}

impl SavingsAccount {
    pub fn new(
        account_number: impl Into<String>,
        balance: Decimal2,
        holder_name: impl Into<String>,
        interest_rate: Decimal2,
    ) -> Result<Self> {
        Ok(SavingsAccount {
            account: Account::new(account_number, balance, holder_name)?,
            interest_rate,
        })
    }

    pub fn interest_rate(&self) -> Decimal2 {
        self.interest_rate
    }

    /// Adds `balance * rate / 100` to the balance, rounded to 2 places.
    ///
    /// Returns the interest credited. On overflow the balance is unchanged
    /// and `InvalidAmount` is returned.
    pub fn apply_interest(&mut self) -> Result<Decimal2> {
        let interest = self
            .account
            .balance()
            .checked_percent_of(self.interest_rate)
            .ok_or_else(|| BankError::invalid_amount(self.interest_rate, "interest overflow"))?;
        self.account.adjust_balance(interest)?;
        Ok(interest)
    }
}

impl BankAccount for SavingsAccount {
    fn base(&self) -> &Account {
        &self.account
    }

    fn base_mut(&mut self) -> &mut Account {
        &mut self.account
    }

    fn kind(&self) -> AccountKind {
        AccountKind::Savings
    }

    fn to_row(&self) -> AccountRow {
        AccountRow {
            interest_rate: Some(self.interest_rate),
            ..self.account.base_row(self.kind())
        }
    }
}
