//! Journal error types.

use rust_decimal::Decimal;
use thiserror::Error;

use kassa_shared::types::AccountId;

use super::types::EntryStatus;

/// Errors raised by journal domain rules.
#[derive(Debug, Error)]
pub enum JournalError {
    // ========== Line Validation ==========
    /// Entry has no lines.
    #[error("Journal entry must have at least one line")]
    NoLines,

    /// Line has neither a debit nor a credit amount.
    #[error("Line amount cannot be zero")]
    ZeroAmount,

    /// Line has a negative amount.
    #[error("Line amount cannot be negative")]
    NegativeAmount,

    /// Line carries both a debit and a credit amount.
    #[error("Line must be either a debit or a credit, not both")]
    BothSides,

    // ========== Balance ==========
    /// Entry totals do not balance.
    #[error("Entry is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Total debit amount.
        debit: Decimal,
        /// Total credit amount.
        credit: Decimal,
    },

    // ========== Account References ==========
    /// Referenced account does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// Referenced account is inactive.
    #[error("Account {0} is inactive")]
    AccountInactive(AccountId),

    /// Referenced account is a group account.
    #[error("Account {0} is a group account and cannot receive postings")]
    AccountNotPostable(AccountId),

    // ========== State Transitions ==========
    /// Only draft entries can be posted.
    #[error("Only draft entries can be posted, current status: {status}")]
    NotDraft {
        /// The entry's current status.
        status: EntryStatus,
    },

    /// Entry is already cancelled.
    #[error("Entry is already cancelled")]
    AlreadyCancelled,

    /// Cannot modify a posted entry.
    #[error("Cannot modify posted entry")]
    CannotModifyPosted,

    /// Cannot modify a cancelled entry.
    #[error("Cannot modify cancelled entry")]
    CannotModifyCancelled,

    /// Only draft entries can be deleted.
    #[error("Can only delete draft entries")]
    CanOnlyDeleteDraft,
}

impl JournalError {
    /// Returns the debit - credit difference for balance errors.
    #[must_use]
    pub fn imbalance(&self) -> Option<Decimal> {
        match self {
            Self::Unbalanced { debit, credit } => Some(debit - credit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn unbalanced_reports_totals_and_difference() {
        let err = JournalError::Unbalanced {
            debit: dec!(1000),
            credit: dec!(900),
        };
        assert_eq!(err.imbalance(), Some(dec!(100)));
        assert_eq!(
            err.to_string(),
            "Entry is not balanced. Debit: 1000, Credit: 900"
        );
    }

    #[test]
    fn not_draft_names_the_status() {
        let err = JournalError::NotDraft {
            status: EntryStatus::Posted,
        };
        assert_eq!(
            err.to_string(),
            "Only draft entries can be posted, current status: posted"
        );
    }

    #[test]
    fn imbalance_is_none_for_other_kinds() {
        assert_eq!(JournalError::NoLines.imbalance(), None);
    }
}
