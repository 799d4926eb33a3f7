//! Edge case tests for the account model and the account store.

use bank_accounts::{
    Account, AccountInfo, AccountKind, AccountRecord, AccountStore, BankAccount, BankError,
    CheckingAccount, Decimal2, SavingsAccount, StoreConfig,
};
use std::str::FromStr;

fn dec(s: &str) -> Decimal2 {
    Decimal2::from_str(s).unwrap()
}

fn store() -> AccountStore {
    AccountStore::connect(&StoreConfig::in_memory()).unwrap()
}

fn assert_matches_info(record: &AccountRecord, info: &AccountInfo) {
    assert_eq!(record.account_number, info.account_number);
    assert_eq!(record.balance, info.balance);
    assert_eq!(record.holder_name, info.holder_name);
    assert_eq!(record.overdraft_limit, info.overdraft_limit);
    assert_eq!(record.interest_rate, info.interest_rate);
}

fn all_variants() -> Vec<Box<dyn BankAccount>> {
    vec![
        Box::new(Account::new("A1", dec("100"), "Ana").unwrap()),
        Box::new(CheckingAccount::new("C1", dec("100"), "Ana", dec("50")).unwrap()),
        Box::new(SavingsAccount::new("S1", dec("100"), "Ana", dec("3")).unwrap()),
    ]
}

// ==================== DEPOSIT EDGE CASES ====================

#[test]
fn test_non_positive_deposit_rejected_for_every_variant() {
    for mut account in all_variants() {
        for amount in ["0", "-0.01", "-100"] {
            let err = account.deposit(dec(amount)).unwrap_err();
            assert!(matches!(err, BankError::InvalidAmount { .. }));
            assert_eq!(account.balance(), dec("100"));
        }
    }
}

#[test]
fn test_smallest_deposit() {
    let mut account = Account::new("A1", Decimal2::ZERO, "Ana").unwrap();
    account.deposit(dec("0.01")).unwrap();
    assert_eq!(account.balance().to_string(), "0.01");
}

#[test]
fn test_deposit_below_precision_rounds_to_zero_and_is_rejected() {
    let mut account = Account::new("A1", Decimal2::ZERO, "Ana").unwrap();
    assert!(account.deposit(dec("0.004")).is_err());
    assert!(account.balance().is_zero());
}

// ==================== WITHDRAWAL EDGE CASES ====================

#[test]
fn test_non_positive_withdrawal_rejected_for_every_variant() {
    for mut account in all_variants() {
        assert!(account.withdraw(Decimal2::ZERO).is_err());
        assert!(account.withdraw(dec("-5")).is_err());
        assert_eq!(account.balance(), dec("100"));
    }
}

#[test]
fn test_base_withdraw_exact_balance() {
    let mut account = Account::new("A1", dec("100"), "Ana").unwrap();
    account.withdraw(dec("100")).unwrap();
    assert!(account.balance().is_zero());
    assert!(account.withdraw(dec("0.01")).is_err());
}

#[test]
fn test_savings_cannot_overdraw() {
    let mut account = SavingsAccount::new("S1", dec("100"), "Ana", dec("3")).unwrap();
    assert!(account.withdraw(dec("100.01")).is_err());
    assert_eq!(account.balance(), dec("100"));
}

#[test]
fn test_checking_withdraw_up_to_limit() {
    let mut account = CheckingAccount::new("C1", dec("100"), "Ana", dec("50")).unwrap();
    account.withdraw(dec("150")).unwrap();
    assert_eq!(account.balance().to_string(), "-50.00");
    assert!(account.withdraw(dec("0.01")).is_err());
}

#[test]
fn test_checking_overdraft_example() {
    let mut account = CheckingAccount::new("C1", dec("100.00"), "Ana", dec("50.00")).unwrap();

    account.withdraw(dec("140")).unwrap();
    assert_eq!(account.balance().to_string(), "-40.00");

    let err = account.withdraw(dec("20")).unwrap_err();
    assert!(matches!(err, BankError::InvalidAmount { .. }));
    assert_eq!(account.balance().to_string(), "-40.00");
}

#[test]
fn test_checking_zero_limit_behaves_like_base() {
    let mut account = CheckingAccount::new("C1", dec("10"), "Ana", Decimal2::ZERO).unwrap();
    assert!(account.withdraw(dec("10.01")).is_err());
    account.withdraw(dec("10")).unwrap();
    assert!(account.balance().is_zero());
}

#[test]
fn test_checking_recovers_from_overdraft_by_deposit() {
    let mut account = CheckingAccount::new("C1", Decimal2::ZERO, "Ana", dec("50")).unwrap();
    account.withdraw(dec("50")).unwrap();
    account.deposit(dec("80")).unwrap();
    assert_eq!(account.balance().to_string(), "30.00");
    account.withdraw(dec("80")).unwrap();
    assert_eq!(account.balance().to_string(), "-50.00");
}

// ==================== INTEREST EDGE CASES ====================

#[test]
fn test_interest_compounds() {
    let mut account = SavingsAccount::new("S1", dec("100"), "Ana", dec("10")).unwrap();
    account.apply_interest().unwrap();
    account.apply_interest().unwrap();
    assert_eq!(account.balance().to_string(), "121.00");
}

#[test]
fn test_interest_on_zero_balance() {
    let mut account = SavingsAccount::new("S1", Decimal2::ZERO, "Ana", dec("5")).unwrap();
    assert!(account.apply_interest().unwrap().is_zero());
    assert!(account.balance().is_zero());
}

#[test]
fn test_interest_rounds_to_cents() {
    let mut account = SavingsAccount::new("S1", dec("0.10"), "Ana", dec("5")).unwrap();
    // 0.10 * 5% = 0.005, rounded half away from zero
    assert_eq!(account.apply_interest().unwrap().to_string(), "0.01");
    assert_eq!(account.balance().to_string(), "0.11");
}

// ==================== STORE ROUND TRIP ====================

#[test]
fn test_round_trip_matches_info_for_every_variant() {
    let store = store();

    for account in all_variants() {
        store.add(&*account).unwrap();
        let record = store.get(account.account_number()).unwrap().unwrap();
        assert_matches_info(&record, &account.info());
        assert_eq!(record.account_type, account.kind());
    }
}

#[test]
fn test_round_trip_after_mutation() {
    let store = store();
    let mut account = CheckingAccount::new("C1", dec("100"), "Ana", dec("50")).unwrap();
    account.withdraw(dec("140")).unwrap();

    store.add(&account).unwrap();
    let record = store.get("C1").unwrap().unwrap();
    assert_matches_info(&record, &account.info());
    assert_eq!(record.balance, -40.0);
}

#[test]
fn test_round_trip_fractional_values() {
    let store = store();
    let account = SavingsAccount::new("S1", dec("1234.56"), "Ana", dec("1.25")).unwrap();

    store.add(&account).unwrap();
    let record = store.get("S1").unwrap().unwrap();
    assert_eq!(record.balance, 1234.56);
    assert_eq!(record.interest_rate, Some(1.25));
    assert_eq!(record.account_type, AccountKind::Savings);
}

#[test]
fn test_store_does_not_track_later_mutations() {
    let store = store();
    let mut account = Account::new("A1", dec("10"), "Ana").unwrap();
    store.add(&account).unwrap();

    account.deposit(dec("5")).unwrap();
    assert_eq!(store.get("A1").unwrap().unwrap().balance, 10.0);

    store.update("A1", Some(account.balance()), None).unwrap();
    assert_eq!(store.get("A1").unwrap().unwrap().balance, 15.0);
}

// ==================== STORE EDGE CASES ====================

#[test]
fn test_duplicate_add_leaves_first_row() {
    let store = store();
    store
        .add(&Account::new("A1", dec("10"), "Ana").unwrap())
        .unwrap();

    let err = store
        .add(&Account::new("A1", dec("999"), "Mallory").unwrap())
        .unwrap_err();
    assert!(matches!(err, BankError::DuplicateAccount { .. }));

    let record = store.get("A1").unwrap().unwrap();
    assert_eq!(record.balance, 10.0);
    assert_eq!(record.holder_name, "Ana");
    assert_eq!(store.all().unwrap().len(), 1);
}

#[test]
fn test_remove_nonexistent_leaves_table_unchanged() {
    let store = store();
    store
        .add(&Account::new("A1", dec("10"), "Ana").unwrap())
        .unwrap();

    let before = store.all().unwrap();
    assert!(!store.remove("ZZ").unwrap());
    assert_eq!(store.all().unwrap(), before);
}

#[test]
fn test_account_numbers_are_case_sensitive() {
    let store = store();
    store
        .add(&Account::new("a1", dec("1"), "Ana").unwrap())
        .unwrap();
    store
        .add(&Account::new("A1", dec("2"), "Bea").unwrap())
        .unwrap();

    assert_eq!(store.get("a1").unwrap().unwrap().holder_name, "Ana");
    assert_eq!(store.get("A1").unwrap().unwrap().holder_name, "Bea");
}

#[test]
fn test_holder_name_with_quotes_is_stored_verbatim() {
    let store = store();
    store
        .add(&Account::new("A1", dec("1"), "O'Brien; DROP TABLE accounts").unwrap())
        .unwrap();

    let record = store.get("A1").unwrap().unwrap();
    assert_eq!(record.holder_name, "O'Brien; DROP TABLE accounts");
}

#[test]
fn test_update_keeps_variant_fields() {
    let store = store();
    store
        .add(&CheckingAccount::new("C1", dec("100"), "Ana", dec("50")).unwrap())
        .unwrap();

    store.update("C1", Some(dec("-20")), Some("Ana B")).unwrap();

    let record = store.get("C1").unwrap().unwrap();
    assert_eq!(record.balance, -20.0);
    assert_eq!(record.holder_name, "Ana B");
    assert_eq!(record.account_type, AccountKind::Checking);
    assert_eq!(record.overdraft_limit, Some(50.0));
}

#[test]
fn test_update_without_fields_changes_nothing() {
    let store = store();
    store
        .add(&Account::new("A1", dec("10"), "Ana").unwrap())
        .unwrap();

    assert!(matches!(
        store.update("A1", None, None),
        Err(BankError::InvalidArgument(_))
    ));
    assert_eq!(store.get("A1").unwrap().unwrap().balance, 10.0);
}
