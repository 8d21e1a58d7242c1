//! Journal entry domain logic.
//!
//! This module implements the posting workflow core:
//! - Entry status lifecycle (Draft -> Posted -> Cancelled)
//! - Entry number formatting and sequence derivation
//! - Line shape and balance validation
//! - Error types for journal operations

pub mod error;
pub mod number;
pub mod types;
pub mod validation;

pub use error::JournalError;
pub use number::{format_entry_no, next_sequence, parse_sequence};
pub use types::{DocumentRef, EntryStatus, EntryTotals, LineInput};
pub use validation::{
    compute_totals, validate_balanced, validate_can_cancel, validate_can_delete,
    validate_can_modify, validate_can_post, validate_lines,
};
