//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kassa_shared::types::{AccountId, EntryId};

use crate::account::AccountType;

/// A posted journal line prepared for report construction.
///
/// Carried into the builders by the persistence layer; only lines whose
/// entry is Posted qualify.
#[derive(Debug, Clone)]
pub struct PostedLine {
    /// The owning entry's ID.
    pub entry_id: EntryId,
    /// The owning entry's number (fixed-width, lexically ordered).
    pub entry_no: String,
    /// The owning entry's date.
    pub entry_date: NaiveDate,
    /// The owning entry's description.
    pub entry_description: String,
    /// The line's own description, if any.
    pub line_description: Option<String>,
    /// Position of the line within its entry.
    pub line_order: i32,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
}

/// One row of an account ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    /// The entry this row came from.
    pub entry_id: EntryId,
    /// Entry number.
    pub entry_no: String,
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Line description, if any.
    pub line_description: Option<String>,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Balance after this row, signed per the account's normal side.
    pub running_balance: Decimal,
}

/// Account ledger report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerReport {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Start of the reported range, if bounded.
    pub from: Option<NaiveDate>,
    /// End of the reported range, if bounded.
    pub to: Option<NaiveDate>,
    /// Balance carried into the range (openings plus prior posted activity).
    pub opening_balance: Decimal,
    /// Sum of debits within the range.
    pub total_debit: Decimal,
    /// Sum of credits within the range.
    pub total_credit: Decimal,
    /// Balance after the last row.
    pub closing_balance: Decimal,
    /// Chronological rows, ordered by (entry date, entry number, line order).
    pub rows: Vec<LedgerRow>,
}

/// Per-account activity prepared for the trial balance.
#[derive(Debug, Clone)]
pub struct AccountActivity {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub account_type: AccountType,
    /// Opening balance, debit side.
    pub opening_debit: Decimal,
    /// Opening balance, credit side.
    pub opening_credit: Decimal,
    /// Posted debit sum up to the as-of date.
    pub period_debit: Decimal,
    /// Posted credit sum up to the as-of date.
    pub period_credit: Decimal,
}

/// One row of a trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account ID.
    pub account_id: AccountId,
    /// Account code.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Opening balance, debit side.
    pub opening_debit: Decimal,
    /// Opening balance, credit side.
    pub opening_credit: Decimal,
    /// Posted debit sum within the period.
    pub period_debit: Decimal,
    /// Posted credit sum within the period.
    pub period_credit: Decimal,
    /// Net closing debit (zero when the account closes credit).
    pub closing_debit: Decimal,
    /// Net closing credit (zero when the account closes debit).
    pub closing_credit: Decimal,
}

/// Trial balance totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Sum of the net closing debit column.
    pub total_debit: Decimal,
    /// Sum of the net closing credit column.
    pub total_credit: Decimal,
    /// Whether the two totals are exactly equal.
    pub is_balanced: bool,
}

/// Trial balance report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// As-of date.
    pub as_of: NaiveDate,
    /// Rows for detail accounts with activity or a closing balance.
    pub rows: Vec<TrialBalanceRow>,
    /// Grand totals over the net closing columns.
    pub totals: TrialBalanceTotals,
}

/// Balance sheet report.
///
/// Groups follow the chart's code-prefix convention: 1 = current assets,
/// 2 = fixed assets, 3 = short-term liabilities, 4 = long-term liabilities,
/// 5 = equity. Liability and equity figures are presented as positive
/// magnitudes (credit-normal balances are already positive for healthy
/// accounts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceSheetReport {
    /// As-of date.
    pub as_of: NaiveDate,
    /// Current assets (code prefix "1").
    pub current_assets: Decimal,
    /// Fixed assets (code prefix "2").
    pub fixed_assets: Decimal,
    /// Total assets.
    pub total_assets: Decimal,
    /// Short-term liabilities (code prefix "3").
    pub short_term_liabilities: Decimal,
    /// Long-term liabilities (code prefix "4").
    pub long_term_liabilities: Decimal,
    /// Total liabilities.
    pub total_liabilities: Decimal,
    /// Equity (code prefix "5").
    pub equity: Decimal,
    /// Liabilities plus equity.
    pub liabilities_and_equity: Decimal,
    /// Whether assets equal liabilities plus equity, exactly.
    pub is_balanced: bool,
}
