//! Account domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use kassa_shared::types::AccountId;

use super::balance::BalanceSide;

/// High-level account classification.
///
/// The type determines the account's normal balance side:
/// - Asset/Expense/Cost accounts are debit-normal
/// - Liability/Equity/Revenue accounts are credit-normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account (cash, receivables, inventory, fixed assets).
    Asset,
    /// Liability account (payables, loans).
    Liability,
    /// Equity account (capital, retained earnings).
    Equity,
    /// Revenue account (sales, other income).
    Revenue,
    /// Expense account (administrative, financing expenses).
    Expense,
    /// Cost account (production and material costs).
    Cost,
}

impl AccountType {
    /// Returns the normal balance side for this account type.
    #[must_use]
    pub const fn normal_side(self) -> BalanceSide {
        match self {
            Self::Asset | Self::Expense | Self::Cost => BalanceSide::DebitNormal,
            Self::Liability | Self::Equity | Self::Revenue => BalanceSide::CreditNormal,
        }
    }
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
            Self::Cost => "cost",
        };
        write!(f, "{s}")
    }
}

/// Maximum length of an account code.
pub const MAX_CODE_LEN: usize = 20;

/// A node in the chart of accounts.
///
/// Group accounts (`is_detail == false`) are pure aggregation nodes; only
/// detail accounts ever appear on journal entry lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier.
    pub id: AccountId,
    /// Unique account code, hierarchical by convention (e.g. "100", "320.01").
    pub code: String,
    /// Account name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Account classification.
    pub account_type: AccountType,
    /// Parent account, if any. The parent must exist before the child.
    pub parent_id: Option<AccountId>,
    /// Depth hint: 1 = group, 2 = subgroup, 3 = detail.
    pub level: i16,
    /// Whether the account may receive journal lines.
    pub is_detail: bool,
    /// Opening balance, debit side. Kept independent of the credit side.
    pub opening_debit: Decimal,
    /// Opening balance, credit side. Kept independent of the debit side.
    pub opening_credit: Decimal,
    /// Whether the account is active.
    pub is_active: bool,
}

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct CreateAccountInput {
    /// Account code (must be unique).
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account description.
    pub description: Option<String>,
    /// Account classification.
    pub account_type: AccountType,
    /// Parent account ID for hierarchical structure.
    pub parent_id: Option<AccountId>,
    /// Depth hint: 1 = group, 2 = subgroup, 3 = detail.
    pub level: i16,
    /// Whether the account may receive journal lines.
    pub is_detail: bool,
    /// Opening balance, debit side.
    pub opening_debit: Decimal,
    /// Opening balance, credit side.
    pub opening_credit: Decimal,
    /// Whether the account is active.
    pub is_active: bool,
}

impl CreateAccountInput {
    /// Checks the structural constraints on the input.
    ///
    /// Returns a human-readable description of the first violated constraint.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.code.trim().is_empty() {
            return Some("account code must not be empty".to_string());
        }
        if self.code.len() > MAX_CODE_LEN {
            return Some(format!("account code must not exceed {MAX_CODE_LEN} characters"));
        }
        if self.name.trim().is_empty() {
            return Some("account name must not be empty".to_string());
        }
        if self.opening_debit.is_sign_negative() || self.opening_credit.is_sign_negative() {
            return Some("opening balances must not be negative".to_string());
        }
        None
    }
}

/// Input for updating an account.
///
/// Enumerates exactly the mutable fields; anything outside this whitelist is
/// not representable and therefore cannot be patched.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountInput {
    /// Account code.
    pub code: Option<String>,
    /// Account name.
    pub name: Option<String>,
    /// Account description (`Some(None)` clears it).
    pub description: Option<Option<String>>,
    /// Account classification.
    pub account_type: Option<AccountType>,
    /// Parent account ID (`Some(None)` detaches the account).
    pub parent_id: Option<Option<AccountId>>,
    /// Depth hint.
    pub level: Option<i16>,
    /// Whether the account may receive journal lines.
    pub is_detail: Option<bool>,
    /// Whether the account is active.
    pub is_active: Option<bool>,
}

impl UpdateAccountInput {
    /// Returns true if the patch contains no changes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.code.is_none()
            && self.name.is_none()
            && self.description.is_none()
            && self.account_type.is_none()
            && self.parent_id.is_none()
            && self.level.is_none()
            && self.is_detail.is_none()
            && self.is_active.is_none()
    }
}
