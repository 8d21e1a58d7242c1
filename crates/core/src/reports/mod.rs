//! Financial report construction.
//!
//! Pure business logic for the three read-only reports:
//! - Account ledger (chronological rows with running balance)
//! - Trial balance (net closing position per detail account)
//! - Balance sheet (code-prefix groups, assets = liabilities + equity)
//!
//! Only lines of Posted entries may be fed into these builders; the
//! persistence layer enforces that filter.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::ReportService;
pub use types::{
    AccountActivity, BalanceSheetReport, LedgerReport, LedgerRow, PostedLine, TrialBalanceReport,
    TrialBalanceRow, TrialBalanceTotals,
};
