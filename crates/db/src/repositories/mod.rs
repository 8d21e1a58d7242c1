//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations, hiding
//! the `SeaORM` implementation details from the rest of the application.

pub mod account;
pub mod journal;
pub mod report;

#[cfg(test)]
mod engine_tests;

pub use account::{AccountError, AccountRepository};
pub use journal::{
    CreateEntryInput, EntryFilter, EntryWithLines, JournalError, JournalRepository,
    UpdateEntryInput,
};
pub use report::{ReportError, ReportRepository};
