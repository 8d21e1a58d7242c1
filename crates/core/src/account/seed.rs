//! Built-in standard chart of accounts.
//!
//! The chart follows the uniform numbering convention used by the reports:
//! first digit 1 = current assets, 2 = fixed assets, 3 = short-term
//! liabilities, 4 = long-term liabilities, 5 = equity, 6 = revenue,
//! 7 = expenses and costs. Group accounts carry two-digit codes; postable
//! detail accounts sit beneath them.

use super::types::AccountType;

/// One row of the built-in standard chart.
#[derive(Debug, Clone, Copy)]
pub struct SeedAccount {
    /// Account code.
    pub code: &'static str,
    /// Account name.
    pub name: &'static str,
    /// Account classification.
    pub account_type: AccountType,
    /// Code of the parent account, which must appear earlier in the table.
    pub parent_code: Option<&'static str>,
    /// Depth hint: 1 = group, 2 = subgroup, 3 = detail.
    pub level: i16,
    /// Whether the account may receive journal lines.
    pub is_detail: bool,
}

const fn row(
    code: &'static str,
    name: &'static str,
    account_type: AccountType,
    parent_code: Option<&'static str>,
    level: i16,
    is_detail: bool,
) -> SeedAccount {
    SeedAccount {
        code,
        name,
        account_type,
        parent_code,
        level,
        is_detail,
    }
}

/// The built-in standard chart, parents before children.
#[must_use]
pub fn standard_chart() -> &'static [SeedAccount] {
    use AccountType::{Asset, Cost, Equity, Expense, Liability, Revenue};

    const CHART: &[SeedAccount] = &[
        // Current assets
        row("10", "Liquid Assets", Asset, None, 1, false),
        row("100", "Cash", Asset, Some("10"), 2, true),
        row("102", "Banks", Asset, Some("10"), 2, true),
        row("12", "Trade Receivables", Asset, None, 1, false),
        row("120", "Customers", Asset, Some("12"), 2, true),
        row("121", "Notes Receivable", Asset, Some("12"), 2, true),
        row("15", "Inventories", Asset, None, 1, false),
        row("153", "Merchandise", Asset, Some("15"), 2, true),
        // Fixed assets
        row("25", "Tangible Fixed Assets", Asset, None, 1, false),
        row("252", "Buildings", Asset, Some("25"), 2, true),
        row("254", "Vehicles", Asset, Some("25"), 2, true),
        row("255", "Furniture and Fixtures", Asset, Some("25"), 2, true),
        // Short-term liabilities
        row("30", "Short-Term Financial Liabilities", Liability, None, 1, false),
        row("300", "Bank Loans", Liability, Some("30"), 2, true),
        row("32", "Trade Payables", Liability, None, 1, false),
        row("320", "Suppliers", Liability, Some("32"), 2, false),
        row("320.01", "Domestic Suppliers", Liability, Some("320"), 3, true),
        row("320.02", "Foreign Suppliers", Liability, Some("320"), 3, true),
        row("36", "Taxes and Duties Payable", Liability, None, 1, false),
        row("360", "Taxes Payable", Liability, Some("36"), 2, true),
        row("361", "Social Security Payable", Liability, Some("36"), 2, true),
        // Long-term liabilities
        row("40", "Long-Term Financial Liabilities", Liability, None, 1, false),
        row("400", "Long-Term Bank Loans", Liability, Some("40"), 2, true),
        // Equity
        row("50", "Paid-In Capital", Equity, None, 1, false),
        row("500", "Share Capital", Equity, Some("50"), 2, true),
        row("57", "Prior Years' Profits", Equity, None, 1, false),
        row("570", "Retained Earnings", Equity, Some("57"), 2, true),
        // Revenue
        row("60", "Gross Sales", Revenue, None, 1, false),
        row("600", "Domestic Sales", Revenue, Some("60"), 2, true),
        row("602", "Other Revenue", Revenue, Some("60"), 2, true),
        // Costs
        row("71", "Direct Material Costs", Cost, None, 1, false),
        row("710", "Direct Raw Materials", Cost, Some("71"), 2, true),
        row("72", "Direct Labor Costs", Cost, None, 1, false),
        row("720", "Direct Labor", Cost, Some("72"), 2, true),
        // Expenses
        row("77", "General Administrative Expenses", Expense, None, 1, false),
        row("770", "Administrative Expenses", Expense, Some("77"), 2, true),
        row("78", "Financing Expenses", Expense, None, 1, false),
        row("780", "Interest Expenses", Expense, Some("78"), 2, true),
    ];

    CHART
}
