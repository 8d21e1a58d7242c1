//! Journal entry domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use kassa_shared::types::AccountId;

/// Journal entry status.
///
/// Entries progress Draft -> Posted -> Cancelled (or Draft -> Cancelled).
/// Nothing ever returns to Draft; Cancelled is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is being drafted; lines may be edited and need not balance.
    Draft,
    /// Entry has been posted; lines are immutable and affect balances.
    Posted,
    /// Entry has been cancelled; lines are retained for audit only.
    Cancelled,
}

impl EntryStatus {
    /// Returns true if the entry's lines can still be modified.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }

    /// Returns true if the entry is immutable.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        matches!(self, Self::Posted | Self::Cancelled)
    }

    /// Returns true if the entry's lines count toward balances and reports.
    #[must_use]
    pub fn affects_balances(&self) -> bool {
        matches!(self, Self::Posted)
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// Input for a single journal line.
///
/// Exactly one of `debit`/`credit` must be positive; the other must be zero.
#[derive(Debug, Clone)]
pub struct LineInput {
    /// The account to post to (must be an active detail account).
    pub account_id: AccountId,
    /// Debit amount (zero if this is a credit line).
    pub debit: Decimal,
    /// Credit amount (zero if this is a debit line).
    pub credit: Decimal,
    /// Optional line description.
    pub description: Option<String>,
}

impl LineInput {
    /// Creates a debit line.
    #[must_use]
    pub fn debit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: amount,
            credit: Decimal::ZERO,
            description: None,
        }
    }

    /// Creates a credit line.
    #[must_use]
    pub fn credit(account_id: AccountId, amount: Decimal) -> Self {
        Self {
            account_id,
            debit: Decimal::ZERO,
            credit: amount,
            description: None,
        }
    }
}

/// Soft pointer to the business document that originated an entry.
///
/// Other modules (invoicing, payments, payroll) tag their postings with this;
/// it is never a structural foreign key, so the engine carries no dependency
/// on their schemas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    /// Short tag for the originating module, e.g. "invoice", "payroll".
    pub reference_type: String,
    /// The originating record's ID in its own module.
    pub reference_id: Uuid,
    /// Human-readable document number, if any.
    pub reference_no: Option<String>,
}

/// Debit/credit totals of an entry.
#[derive(Debug, Clone, Copy)]
pub struct EntryTotals {
    /// Sum of all debit amounts.
    pub total_debit: Decimal,
    /// Sum of all credit amounts.
    pub total_credit: Decimal,
    /// Whether debits equal credits (exact comparison).
    pub is_balanced: bool,
}

impl EntryTotals {
    /// Creates totals from debit and credit sums.
    #[must_use]
    pub fn new(total_debit: Decimal, total_credit: Decimal) -> Self {
        Self {
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        }
    }

    /// Returns the difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Decimal {
        self.total_debit - self.total_credit
    }
}
