//! Business rule validation for journal operations.

use rust_decimal::Decimal;

use super::error::JournalError;
use super::types::{EntryStatus, EntryTotals, LineInput};

/// Validates the shape of an entry's lines.
///
/// Each line must carry exactly one positive side; amounts must not be
/// negative. Balance is NOT checked here - a draft may be unbalanced while it
/// is being edited.
///
/// # Errors
///
/// Returns an error if there are no lines or any line violates the
/// one-side-only rule.
pub fn validate_lines(lines: &[LineInput]) -> Result<(), JournalError> {
    if lines.is_empty() {
        return Err(JournalError::NoLines);
    }

    for line in lines {
        if line.debit < Decimal::ZERO || line.credit < Decimal::ZERO {
            return Err(JournalError::NegativeAmount);
        }
        if line.debit > Decimal::ZERO && line.credit > Decimal::ZERO {
            return Err(JournalError::BothSides);
        }
        if line.debit == Decimal::ZERO && line.credit == Decimal::ZERO {
            return Err(JournalError::ZeroAmount);
        }
    }

    Ok(())
}

/// Computes entry totals from debit/credit pairs.
#[must_use]
pub fn compute_totals<'a, I>(lines: I) -> EntryTotals
where
    I: IntoIterator<Item = (&'a Decimal, &'a Decimal)>,
{
    let mut total_debit = Decimal::ZERO;
    let mut total_credit = Decimal::ZERO;
    for (debit, credit) in lines {
        total_debit += *debit;
        total_credit += *credit;
    }
    EntryTotals::new(total_debit, total_credit)
}

/// Validates the double-entry balance invariant for posting.
///
/// Uses exact fixed-point comparison, never approximation.
///
/// # Errors
///
/// Returns [`JournalError::Unbalanced`] carrying both totals when debits do
/// not equal credits.
pub fn validate_balanced(totals: &EntryTotals) -> Result<(), JournalError> {
    if totals.is_balanced {
        Ok(())
    } else {
        Err(JournalError::Unbalanced {
            debit: totals.total_debit,
            credit: totals.total_credit,
        })
    }
}

/// Validates that an entry can be posted.
///
/// # Errors
///
/// Returns [`JournalError::NotDraft`] for Posted and Cancelled entries;
/// neither can ever be (re-)posted.
pub fn validate_can_post(status: EntryStatus) -> Result<(), JournalError> {
    match status {
        EntryStatus::Draft => Ok(()),
        status => Err(JournalError::NotDraft { status }),
    }
}

/// Validates that an entry can be cancelled.
///
/// Cancellation is allowed from Draft or Posted; Cancelled is terminal.
///
/// # Errors
///
/// Returns [`JournalError::AlreadyCancelled`] for cancelled entries.
pub fn validate_can_cancel(status: EntryStatus) -> Result<(), JournalError> {
    match status {
        EntryStatus::Cancelled => Err(JournalError::AlreadyCancelled),
        _ => Ok(()),
    }
}

/// Validates that an entry's header or lines can be modified.
///
/// # Errors
///
/// Returns an error for Posted and Cancelled entries.
pub fn validate_can_modify(status: EntryStatus) -> Result<(), JournalError> {
    match status {
        EntryStatus::Posted => Err(JournalError::CannotModifyPosted),
        EntryStatus::Cancelled => Err(JournalError::CannotModifyCancelled),
        EntryStatus::Draft => Ok(()),
    }
}

/// Validates that an entry can be deleted.
///
/// # Errors
///
/// Returns an error unless the entry is a draft.
pub fn validate_can_delete(status: EntryStatus) -> Result<(), JournalError> {
    if status == EntryStatus::Draft {
        Ok(())
    } else {
        Err(JournalError::CanOnlyDeleteDraft)
    }
}
