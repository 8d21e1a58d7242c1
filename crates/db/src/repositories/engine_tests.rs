//! Workflow tests for the bookkeeping engine.
//!
//! Exercises the core posting and reporting pipeline the repositories drive:
//! line validation, the balance gate, status transitions, and report
//! construction from posted-only data.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use kassa_core::account::{Account, AccountType};
use kassa_core::journal::{
    compute_totals, validate_balanced, validate_can_cancel, validate_can_post, validate_lines,
    EntryStatus, JournalError, LineInput,
};
use kassa_core::reports::{AccountActivity, PostedLine, ReportService};
use kassa_shared::types::{AccountId, EntryId};

use crate::entities::sea_orm_active_enums;

fn account(code: &str, account_type: AccountType) -> Account {
    Account {
        id: AccountId::new(),
        code: code.to_string(),
        name: format!("Account {code}"),
        description: None,
        account_type,
        parent_id: None,
        level: 2,
        is_detail: true,
        opening_debit: Decimal::ZERO,
        opening_credit: Decimal::ZERO,
        is_active: true,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A recorded posting: which account, which side, how much.
struct Posting {
    account: usize,
    debit: Decimal,
    credit: Decimal,
}

/// Drives the same gate the repository applies before flipping an entry to
/// Posted: shape check, then exact balance check.
fn try_post(lines: &[LineInput]) -> Result<(), JournalError> {
    validate_lines(lines)?;
    let totals = compute_totals(lines.iter().map(|l| (&l.debit, &l.credit)));
    validate_balanced(&totals)
}

// ============================================================================
// Posting gate
// ============================================================================

#[test]
fn invoice_style_entry_posts_when_balanced() {
    let receivables = account("120", AccountType::Asset);
    let sales = account("600", AccountType::Revenue);

    let lines = vec![
        LineInput::debit(receivables.id, dec!(1180)),
        LineInput::credit(sales.id, dec!(1000)),
        LineInput::credit(account("360", AccountType::Liability).id, dec!(180)),
    ];

    assert!(try_post(&lines).is_ok());
}

#[test]
fn unbalanced_entry_is_rejected_with_difference() {
    let lines = vec![
        LineInput::debit(AccountId::new(), dec!(1000)),
        LineInput::credit(AccountId::new(), dec!(900)),
    ];

    let err = try_post(&lines).unwrap_err();
    assert_eq!(err.imbalance(), Some(dec!(100)));
}

#[test]
fn posted_and_cancelled_entries_cannot_be_reposted() {
    assert!(validate_can_post(EntryStatus::Draft).is_ok());
    assert!(validate_can_post(EntryStatus::Posted).is_err());
    assert!(validate_can_post(EntryStatus::Cancelled).is_err());
}

#[test]
fn cancellation_is_terminal() {
    assert!(validate_can_cancel(EntryStatus::Draft).is_ok());
    assert!(validate_can_cancel(EntryStatus::Posted).is_ok());
    assert!(matches!(
        validate_can_cancel(EntryStatus::Cancelled),
        Err(JournalError::AlreadyCancelled)
    ));
}

#[test]
fn status_round_trips_through_the_database_enum() {
    for status in [EntryStatus::Draft, EntryStatus::Posted, EntryStatus::Cancelled] {
        let db: sea_orm_active_enums::EntryStatus = status.into();
        let back: EntryStatus = db.into();
        assert_eq!(back, status);
    }
}

// ============================================================================
// Posted-only reporting
// ============================================================================

#[test]
fn cancelled_postings_never_reach_the_reports() {
    // Two balanced movements; the second entry is cancelled after posting.
    // Reports accumulate only entries whose status affects balances, so the
    // cancelled movement must not contribute.
    let cash = account("100", AccountType::Asset);
    let capital = account("500", AccountType::Equity);
    let accounts = [&cash, &capital];

    let entries: Vec<(EntryStatus, Vec<Posting>)> = vec![
        (
            EntryStatus::Posted,
            vec![
                Posting { account: 0, debit: dec!(5000), credit: dec!(0) },
                Posting { account: 1, debit: dec!(0), credit: dec!(5000) },
            ],
        ),
        (
            EntryStatus::Cancelled,
            vec![
                Posting { account: 0, debit: dec!(700), credit: dec!(0) },
                Posting { account: 1, debit: dec!(0), credit: dec!(700) },
            ],
        ),
    ];

    let mut debits = [Decimal::ZERO; 2];
    let mut credits = [Decimal::ZERO; 2];
    for (status, postings) in &entries {
        if !status.affects_balances() {
            continue;
        }
        for posting in postings {
            debits[posting.account] += posting.debit;
            credits[posting.account] += posting.credit;
        }
    }

    let activities: Vec<AccountActivity> = accounts
        .iter()
        .enumerate()
        .map(|(i, acc)| AccountActivity {
            account_id: acc.id,
            code: acc.code.clone(),
            name: acc.name.clone(),
            account_type: acc.account_type,
            opening_debit: acc.opening_debit,
            opening_credit: acc.opening_credit,
            period_debit: debits[i],
            period_credit: credits[i],
        })
        .collect();

    let report = ReportService::build_trial_balance(date(2026, 12, 31), activities);

    assert_eq!(report.rows.len(), 2);
    assert_eq!(report.rows[0].closing_debit, dec!(5000));
    assert_eq!(report.rows[1].closing_credit, dec!(5000));
    assert!(report.totals.is_balanced);
}

#[test]
fn ledger_and_balance_sheet_agree_on_an_account() {
    let cash = account("100", AccountType::Asset);

    let lines = vec![
        PostedLine {
            entry_id: EntryId::new(),
            entry_no: "YV-2026-00001".to_string(),
            entry_date: date(2026, 1, 10),
            entry_description: "loan drawdown".to_string(),
            line_description: None,
            line_order: 1,
            debit: dec!(2000),
            credit: dec!(0),
        },
        PostedLine {
            entry_id: EntryId::new(),
            entry_no: "YV-2026-00002".to_string(),
            entry_date: date(2026, 2, 10),
            entry_description: "partial repayment".to_string(),
            line_description: None,
            line_order: 1,
            debit: dec!(0),
            credit: dec!(500),
        },
    ];

    let ledger =
        ReportService::build_ledger(&cash, Decimal::ZERO, Decimal::ZERO, lines, None, None);
    assert_eq!(ledger.closing_balance, dec!(1500));

    let balances = vec![
        ("100".to_string(), ledger.closing_balance),
        // Mirror side on the liability, credit-normal and already positive.
        ("300".to_string(), dec!(1500)),
    ];

    let sheet = ReportService::build_balance_sheet(date(2026, 12, 31), &balances);
    assert_eq!(sheet.total_assets, dec!(1500));
    assert_eq!(sheet.total_liabilities, dec!(1500));
    assert!(sheet.is_balanced);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Any mix of postings that passes the posting gate yields a balanced
    /// trial balance, regardless of which accounts the money moves between.
    #[test]
    fn prop_posted_data_always_balances(
        movements in prop::collection::vec((0usize..4, 1usize..4, 1i64..1_000_000i64), 1..25),
    ) {
        let accounts = [
            account("100", AccountType::Asset),
            account("320", AccountType::Liability),
            account("500", AccountType::Equity),
            account("600", AccountType::Revenue),
        ];

        let mut debits = [Decimal::ZERO; 4];
        let mut credits = [Decimal::ZERO; 4];

        for (from, offset, amount) in movements {
            let to = (from + offset) % 4;
            let value = Decimal::new(amount, 2);

            let lines = vec![
                LineInput::debit(accounts[from].id, value),
                LineInput::credit(accounts[to].id, value),
            ];
            prop_assert!(try_post(&lines).is_ok());

            debits[from] += value;
            credits[to] += value;
        }

        let activities: Vec<AccountActivity> = accounts
            .iter()
            .enumerate()
            .map(|(i, acc)| AccountActivity {
                account_id: acc.id,
                code: acc.code.clone(),
                name: acc.name.clone(),
                account_type: acc.account_type,
                opening_debit: Decimal::ZERO,
                opening_credit: Decimal::ZERO,
                period_debit: debits[i],
                period_credit: credits[i],
            })
            .collect();

        let report = ReportService::build_trial_balance(date(2026, 12, 31), activities);
        prop_assert!(report.totals.is_balanced);
    }
}
