//! Account balance calculation.
//!
//! This is the single authoritative sign-convention function: every balance
//! shown anywhere (ledger openings, trial balance closings, balance sheet
//! groups) is derived through [`account_balance`] / [`BalanceSide::signed`].
//! The sign logic exists nowhere else.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Account;

/// Normal balance side of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceSide {
    /// Debit-normal accounts (Asset, Expense, Cost).
    DebitNormal,
    /// Credit-normal accounts (Liability, Equity, Revenue).
    CreditNormal,
}

impl BalanceSide {
    /// Returns the signed movement for a debit/credit pair on this side.
    ///
    /// - Debit-normal: `debit - credit`
    /// - Credit-normal: `credit - debit`
    #[must_use]
    pub fn signed(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::DebitNormal => debit - credit,
            Self::CreditNormal => credit - debit,
        }
    }
}

/// Returns the opening balance of an account, signed per its normal side.
///
/// The opening debit and credit are stored independently (not pre-netted);
/// the net is taken here, on the account's normal side.
#[must_use]
pub fn opening_balance(account: &Account) -> Decimal {
    account
        .account_type
        .normal_side()
        .signed(account.opening_debit, account.opening_credit)
}

/// Returns the account balance given the posted period sums.
///
/// - Debit-normal: `(opening_debit - opening_credit) + (period_debit - period_credit)`
/// - Credit-normal: `(opening_credit - opening_debit) + (period_credit - period_debit)`
///
/// `period_debit`/`period_credit` must be the sums over lines of Posted
/// entries only (optionally bounded by an as-of date); cancelled and draft
/// entries never contribute.
#[must_use]
pub fn account_balance(account: &Account, period_debit: Decimal, period_credit: Decimal) -> Decimal {
    let side = account.account_type.normal_side();
    opening_balance(account) + side.signed(period_debit, period_credit)
}

/// Sums signed balances over all accounts whose code starts with `prefix`.
///
/// Used by the balance-sheet grouping convention (first digit 1-2 = assets,
/// 3-4 = liabilities, 5 = equity). The inputs are `(code, balance)` pairs for
/// detail accounts, with balances already computed via [`account_balance`].
#[must_use]
pub fn sum_by_code_prefix(balances: &[(String, Decimal)], prefix: &str) -> Decimal {
    balances
        .iter()
        .filter(|(code, _)| code.starts_with(prefix))
        .map(|(_, balance)| *balance)
        .sum()
}
