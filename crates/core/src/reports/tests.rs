//! Tests for report construction.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use kassa_shared::types::{AccountId, EntryId};

use crate::account::{Account, AccountType};
use crate::journal::format_entry_no;

use super::service::ReportService;
use super::types::{AccountActivity, PostedLine};

fn account(account_type: AccountType, opening_debit: Decimal, opening_credit: Decimal) -> Account {
    Account {
        id: AccountId::new(),
        code: "100".to_string(),
        name: "Cash".to_string(),
        description: None,
        account_type,
        parent_id: None,
        level: 2,
        is_detail: true,
        opening_debit,
        opening_credit,
        is_active: true,
    }
}

fn line(date: (i32, u32, u32), seq: i64, debit: Decimal, credit: Decimal) -> PostedLine {
    PostedLine {
        entry_id: EntryId::new(),
        entry_no: format_entry_no("YV", date.0, seq),
        entry_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        entry_description: "entry".to_string(),
        line_description: None,
        line_order: 1,
        debit,
        credit,
    }
}

fn activity(
    code: &str,
    opening: (Decimal, Decimal),
    period: (Decimal, Decimal),
) -> AccountActivity {
    AccountActivity {
        account_id: AccountId::new(),
        code: code.to_string(),
        name: format!("Account {code}"),
        account_type: AccountType::Asset,
        opening_debit: opening.0,
        opening_credit: opening.1,
        period_debit: period.0,
        period_credit: period.1,
    }
}

// ============================================================================
// Account ledger
// ============================================================================

#[test]
fn ledger_orders_by_date_then_entry_no() {
    let acc = account(AccountType::Asset, dec!(0), dec!(0));
    let lines = vec![
        line((2026, 3, 15), 7, dec!(100), dec!(0)),
        line((2026, 3, 15), 2, dec!(50), dec!(0)),
        line((2026, 1, 10), 9, dec!(25), dec!(0)),
    ];

    let report = ReportService::build_ledger(&acc, dec!(0), dec!(0), lines, None, None);

    let numbers: Vec<&str> = report.rows.iter().map(|r| r.entry_no.as_str()).collect();
    assert_eq!(numbers, vec!["YV-2026-00009", "YV-2026-00002", "YV-2026-00007"]);
    assert_eq!(report.rows[0].entry_date, NaiveDate::from_ymd_opt(2026, 1, 10).unwrap());
}

#[test]
fn ledger_running_balance_chains_from_opening() {
    // Asset with opening debit 500 and prior posted debit 200: opening 700.
    let acc = account(AccountType::Asset, dec!(500), dec!(0));
    let lines = vec![
        line((2026, 2, 1), 1, dec!(100), dec!(0)),
        line((2026, 2, 2), 2, dec!(0), dec!(30)),
    ];

    let report = ReportService::build_ledger(&acc, dec!(200), dec!(0), lines, None, None);

    assert_eq!(report.opening_balance, dec!(700));
    assert_eq!(report.rows[0].running_balance, dec!(800));
    assert_eq!(report.rows[1].running_balance, dec!(770));
    assert_eq!(report.closing_balance, dec!(770));
    assert_eq!(report.total_debit, dec!(100));
    assert_eq!(report.total_credit, dec!(30));
}

#[test]
fn ledger_is_credit_normal_for_liabilities() {
    let acc = account(AccountType::Liability, dec!(0), dec!(500));
    let lines = vec![line((2026, 2, 1), 1, dec!(0), dec!(200))];

    let report = ReportService::build_ledger(&acc, dec!(0), dec!(0), lines, None, None);

    assert_eq!(report.opening_balance, dec!(500));
    assert_eq!(report.closing_balance, dec!(700));
}

#[test]
fn ledger_is_idempotent() {
    let acc = account(AccountType::Asset, dec!(10), dec!(0));
    let lines = vec![
        line((2026, 5, 1), 3, dec!(40), dec!(0)),
        line((2026, 4, 1), 1, dec!(0), dec!(5)),
    ];

    let first = ReportService::build_ledger(&acc, dec!(2), dec!(0), lines.clone(), None, None);
    let second = ReportService::build_ledger(&acc, dec!(2), dec!(0), lines, None, None);

    assert_eq!(first.rows, second.rows);
    assert_eq!(first.closing_balance, second.closing_balance);
}

#[test]
fn empty_ledger_closes_at_opening() {
    let acc = account(AccountType::Asset, dec!(500), dec!(120));
    let report = ReportService::build_ledger(&acc, dec!(0), dec!(0), vec![], None, None);
    assert_eq!(report.opening_balance, dec!(380));
    assert_eq!(report.closing_balance, dec!(380));
    assert!(report.rows.is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The closing balance always equals opening plus the signed row sum.
    #[test]
    fn prop_ledger_closing_is_opening_plus_movements(
        amounts in prop::collection::vec((1i64..100_000i64, prop::bool::ANY), 1..20),
    ) {
        let acc = account(AccountType::Asset, dec!(0), dec!(0));
        let lines: Vec<PostedLine> = amounts
            .iter()
            .enumerate()
            .map(|(i, (amount, is_debit))| {
                let value = Decimal::new(*amount, 2);
                let (debit, credit) = if *is_debit {
                    (value, Decimal::ZERO)
                } else {
                    (Decimal::ZERO, value)
                };
                line((2026, 1, 1), i64::try_from(i + 1).unwrap(), debit, credit)
            })
            .collect();

        let expected: Decimal = lines.iter().map(|l| l.debit - l.credit).sum();
        let report = ReportService::build_ledger(&acc, Decimal::ZERO, Decimal::ZERO, lines, None, None);

        prop_assert_eq!(report.closing_balance, report.opening_balance + expected);

        // Consecutive rows chain exactly.
        let mut previous = report.opening_balance;
        for row in &report.rows {
            prop_assert_eq!(row.running_balance, previous + row.debit - row.credit);
            previous = row.running_balance;
        }
    }
}

// ============================================================================
// Trial balance
// ============================================================================

#[test]
fn trial_balance_reduces_to_net_columns() {
    let as_of = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
    let rows = vec![
        activity("100", (dec!(0), dec!(0)), (dec!(1000), dec!(400))),
        activity("320", (dec!(0), dec!(200)), (dec!(100), dec!(500))),
    ];

    let report = ReportService::build_trial_balance(as_of, rows);

    assert_eq!(report.rows[0].closing_debit, dec!(600));
    assert_eq!(report.rows[0].closing_credit, Decimal::ZERO);
    assert_eq!(report.rows[1].closing_debit, Decimal::ZERO);
    assert_eq!(report.rows[1].closing_credit, dec!(600));
    assert!(report.totals.is_balanced);
}

#[test]
fn trial_balance_omits_inactive_zero_accounts() {
    let as_of = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
    let rows = vec![
        // No activity, zero closing: omitted.
        activity("100", (dec!(0), dec!(0)), (dec!(0), dec!(0))),
        // No activity but an opening balance: kept.
        activity("102", (dec!(300), dec!(0)), (dec!(0), dec!(0))),
        // Activity netting to zero: kept.
        activity("120", (dec!(0), dec!(0)), (dec!(250), dec!(250))),
        // Opening netting to zero, no activity: omitted.
        activity("153", (dec!(80), dec!(80)), (dec!(0), dec!(0))),
    ];

    let report = ReportService::build_trial_balance(as_of, rows);

    let codes: Vec<&str> = report.rows.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["102", "120"]);
}

#[test]
fn trial_balance_rows_are_sorted_by_code() {
    let as_of = NaiveDate::from_ymd_opt(2026, 6, 30).unwrap();
    let rows = vec![
        activity("320", (dec!(0), dec!(0)), (dec!(0), dec!(10))),
        activity("100", (dec!(0), dec!(0)), (dec!(10), dec!(0))),
    ];

    let report = ReportService::build_trial_balance(as_of, rows);
    let codes: Vec<&str> = report.rows.iter().map(|r| r.code.as_str()).collect();
    assert_eq!(codes, vec!["100", "320"]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Datasets built from balanced postings always produce balanced totals.
    #[test]
    fn prop_trial_balance_balances_for_balanced_postings(
        postings in prop::collection::vec((0usize..6, 0usize..6, 1i64..100_000i64), 1..30),
    ) {
        let as_of = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let codes = ["100", "102", "120", "320", "500", "600"];
        let mut debits = [Decimal::ZERO; 6];
        let mut credits = [Decimal::ZERO; 6];

        // Every posting debits one account and credits another with the same
        // amount, mirroring how balanced entries move money.
        for (debit_idx, credit_idx, amount) in postings {
            let value = Decimal::new(amount, 2);
            debits[debit_idx] += value;
            credits[credit_idx] += value;
        }

        let activities: Vec<AccountActivity> = codes
            .iter()
            .enumerate()
            .map(|(i, code)| activity(code, (Decimal::ZERO, Decimal::ZERO), (debits[i], credits[i])))
            .collect();

        let report = ReportService::build_trial_balance(as_of, activities);
        prop_assert!(report.totals.is_balanced);
        prop_assert_eq!(report.totals.total_debit, report.totals.total_credit);
    }
}

// ============================================================================
// Balance sheet
// ============================================================================

#[test]
fn balance_sheet_groups_by_code_prefix() {
    let as_of = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
    let balances = vec![
        ("100".to_string(), dec!(900)),
        ("153".to_string(), dec!(100)),
        ("254".to_string(), dec!(500)),
        ("300".to_string(), dec!(400)),
        ("400".to_string(), dec!(600)),
        ("500".to_string(), dec!(500)),
    ];

    let report = ReportService::build_balance_sheet(as_of, &balances);

    assert_eq!(report.current_assets, dec!(1000));
    assert_eq!(report.fixed_assets, dec!(500));
    assert_eq!(report.total_assets, dec!(1500));
    assert_eq!(report.short_term_liabilities, dec!(400));
    assert_eq!(report.long_term_liabilities, dec!(600));
    assert_eq!(report.total_liabilities, dec!(1000));
    assert_eq!(report.equity, dec!(500));
    assert_eq!(report.liabilities_and_equity, dec!(1500));
    assert!(report.is_balanced);
}

#[test]
fn balance_sheet_check_is_exact() {
    let as_of = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
    // One cent off: no tolerance is applied.
    let balances = vec![
        ("100".to_string(), dec!(100.00)),
        ("300".to_string(), dec!(99.99)),
    ];

    let report = ReportService::build_balance_sheet(as_of, &balances);
    assert!(!report.is_balanced);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Balance-sheet postings (asset vs liability/equity) keep the equation
    /// exact for any sequence of balanced movements.
    #[test]
    fn prop_accounting_equation_holds_for_balanced_movements(
        movements in prop::collection::vec((0usize..3, 1i64..100_000i64), 1..30),
    ) {
        let as_of = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        let mut cash = Decimal::ZERO;        // "100", asset, debit-normal
        let mut loans = Decimal::ZERO;       // "300", liability, credit-normal
        let mut capital = Decimal::ZERO;     // "500", equity, credit-normal

        for (kind, amount) in movements {
            let value = Decimal::new(amount, 2);
            match kind {
                // Borrow: debit cash, credit loans.
                0 => { cash += value; loans += value; }
                // Contribute capital: debit cash, credit capital.
                1 => { cash += value; capital += value; }
                // Repay: credit cash, debit loans.
                _ => { cash -= value; loans -= value; }
            }
        }

        let balances = vec![
            ("100".to_string(), cash),
            ("300".to_string(), loans),
            ("500".to_string(), capital),
        ];

        let report = ReportService::build_balance_sheet(as_of, &balances);
        prop_assert!(report.is_balanced);
    }
}
