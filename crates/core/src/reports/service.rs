//! Report construction service.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::account::{account_balance, balance::sum_by_code_prefix, Account};

use super::types::{
    AccountActivity, BalanceSheetReport, LedgerReport, LedgerRow, PostedLine, TrialBalanceReport,
    TrialBalanceRow, TrialBalanceTotals,
};

/// Service for constructing financial reports from posted data.
///
/// All builders are pure: identical inputs yield identical reports, so a
/// report can always be re-run from a fresh query.
pub struct ReportService;

impl ReportService {
    /// Builds an account ledger.
    ///
    /// `prior_debit`/`prior_credit` are the posted sums strictly before the
    /// range; together with the account's openings they form the opening
    /// balance, via the one sign-convention function. Rows are ordered by
    /// (entry date, entry number, line order) - the entry number's fixed
    /// width makes the lexical tie-break deterministic. Each row adds the
    /// account's normal-signed movement to the running balance.
    #[must_use]
    pub fn build_ledger(
        account: &Account,
        prior_debit: Decimal,
        prior_credit: Decimal,
        mut lines: Vec<PostedLine>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> LedgerReport {
        lines.sort_by(|a, b| {
            (a.entry_date, &a.entry_no, a.line_order).cmp(&(b.entry_date, &b.entry_no, b.line_order))
        });

        let side = account.account_type.normal_side();
        let opening_balance = account_balance(account, prior_debit, prior_credit);

        let mut running = opening_balance;
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        let mut rows = Vec::with_capacity(lines.len());

        for line in lines {
            running += side.signed(line.debit, line.credit);
            total_debit += line.debit;
            total_credit += line.credit;
            rows.push(LedgerRow {
                entry_id: line.entry_id,
                entry_no: line.entry_no,
                entry_date: line.entry_date,
                description: line.entry_description,
                line_description: line.line_description,
                debit: line.debit,
                credit: line.credit,
                running_balance: running,
            });
        }

        LedgerReport {
            account_id: account.id,
            code: account.code.clone(),
            name: account.name.clone(),
            account_type: account.account_type,
            from,
            to,
            opening_balance,
            total_debit,
            total_credit,
            closing_balance: running,
            rows,
        }
    }

    /// Builds a trial balance from per-account activity.
    ///
    /// Only detail accounts belong in the input; group accounts never appear
    /// in a trial balance. Each account's closing position is reduced to one
    /// net column, and rows with zero period activity AND zero closing
    /// balance are omitted so the report lists only active accounts. Totals
    /// accumulate the net closing columns only.
    #[must_use]
    pub fn build_trial_balance(
        as_of: NaiveDate,
        mut activities: Vec<AccountActivity>,
    ) -> TrialBalanceReport {
        activities.sort_by(|a, b| a.code.cmp(&b.code));

        let mut rows = Vec::with_capacity(activities.len());
        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;

        for activity in activities {
            let gross_debit = activity.opening_debit + activity.period_debit;
            let gross_credit = activity.opening_credit + activity.period_credit;
            let net = gross_debit - gross_credit;

            let no_activity = activity.period_debit == Decimal::ZERO
                && activity.period_credit == Decimal::ZERO;
            if no_activity && net == Decimal::ZERO {
                continue;
            }

            let (closing_debit, closing_credit) = if net > Decimal::ZERO {
                (net, Decimal::ZERO)
            } else {
                (Decimal::ZERO, -net)
            };

            total_debit += closing_debit;
            total_credit += closing_credit;

            rows.push(TrialBalanceRow {
                account_id: activity.account_id,
                code: activity.code,
                name: activity.name,
                opening_debit: activity.opening_debit,
                opening_credit: activity.opening_credit,
                period_debit: activity.period_debit,
                period_credit: activity.period_credit,
                closing_debit,
                closing_credit,
            });
        }

        TrialBalanceReport {
            as_of,
            rows,
            totals: TrialBalanceTotals {
                total_debit,
                total_credit,
                is_balanced: total_debit == total_credit,
            },
        }
    }

    /// Builds a balance sheet from detail-account balances.
    ///
    /// `balances` holds `(code, balance)` pairs where each balance was
    /// computed via the sign-convention function, so liability and equity
    /// groups already come out as positive magnitudes for healthy accounts.
    /// The accounting equation is checked with exact fixed-point equality.
    #[must_use]
    pub fn build_balance_sheet(
        as_of: NaiveDate,
        balances: &[(String, Decimal)],
    ) -> BalanceSheetReport {
        let current_assets = sum_by_code_prefix(balances, "1");
        let fixed_assets = sum_by_code_prefix(balances, "2");
        let short_term_liabilities = sum_by_code_prefix(balances, "3");
        let long_term_liabilities = sum_by_code_prefix(balances, "4");
        let equity = sum_by_code_prefix(balances, "5");

        let total_assets = current_assets + fixed_assets;
        let total_liabilities = short_term_liabilities + long_term_liabilities;
        let liabilities_and_equity = total_liabilities + equity;

        BalanceSheetReport {
            as_of,
            current_assets,
            fixed_assets,
            total_assets,
            short_term_liabilities,
            long_term_liabilities,
            total_liabilities,
            equity,
            liabilities_and_equity,
            is_balanced: total_assets == liabilities_and_equity,
        }
    }
}
