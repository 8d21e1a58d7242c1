//! Report repository for financial report database operations.
//!
//! Pure reads: every query considers Posted entries only, and posted data is
//! immutable, so reports can run under a consistent snapshot without
//! blocking writers.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use kassa_core::account::{account_balance, Account};
use kassa_core::reports::{
    AccountActivity, BalanceSheetReport, LedgerReport, PostedLine, ReportService,
    TrialBalanceReport,
};

use crate::entities::{
    accounts, journal_entries, journal_lines,
    sea_orm_active_enums::EntryStatus,
};

/// Error types for report operations.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Account not found.
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),

    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Report repository for ledger, trial balance, and balance sheet queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Produces the ledger for one account.
    ///
    /// The opening balance folds the account's openings together with all
    /// posted activity strictly before `from`; rows cover posted lines within
    /// the range, ordered by (entry date, entry number, line order) with a
    /// running balance per row. Re-running on unchanged data yields an
    /// identical report.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing or the range is inverted.
    pub async fn account_ledger(
        &self,
        account_id: Uuid,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<LedgerReport, ReportError> {
        if let (Some(start), Some(end)) = (from, to) {
            if start > end {
                return Err(ReportError::InvalidDateRange { start, end });
            }
        }

        let account: Account = accounts::Entity::find_by_id(account_id)
            .one(&self.db)
            .await?
            .ok_or(ReportError::AccountNotFound(account_id))?
            .into();

        // Posted entry metadata keyed by ID; `to` bounds the whole report.
        let mut entry_query = journal_entries::Entity::find()
            .filter(journal_entries::Column::Status.eq(EntryStatus::Posted));
        if let Some(end) = to {
            entry_query = entry_query.filter(journal_entries::Column::EntryDate.lte(end));
        }
        let posted: HashMap<Uuid, journal_entries::Model> = entry_query
            .all(&self.db)
            .await?
            .into_iter()
            .map(|entry| (entry.id, entry))
            .collect();

        if posted.is_empty() {
            return Ok(ReportService::build_ledger(
                &account,
                Decimal::ZERO,
                Decimal::ZERO,
                Vec::new(),
                from,
                to,
            ));
        }

        let lines = journal_lines::Entity::find()
            .filter(journal_lines::Column::AccountId.eq(account_id))
            .filter(journal_lines::Column::EntryId.is_in(posted.keys().copied()))
            .all(&self.db)
            .await?;

        let mut prior_debit = Decimal::ZERO;
        let mut prior_credit = Decimal::ZERO;
        let mut rows = Vec::new();

        for line in lines {
            let Some(entry) = posted.get(&line.entry_id) else {
                continue;
            };

            if from.is_some_and(|start| entry.entry_date < start) {
                prior_debit += line.debit;
                prior_credit += line.credit;
                continue;
            }

            rows.push(PostedLine {
                entry_id: entry.id.into(),
                entry_no: entry.entry_no.clone(),
                entry_date: entry.entry_date,
                entry_description: entry.description.clone(),
                line_description: line.description,
                line_order: line.line_order,
                debit: line.debit,
                credit: line.credit,
            });
        }

        Ok(ReportService::build_ledger(
            &account,
            prior_debit,
            prior_credit,
            rows,
            from,
            to,
        ))
    }

    /// Produces the trial balance as of a date.
    ///
    /// Detail accounts only; group accounts never appear. Rows with zero
    /// period activity and zero closing balance are omitted by the builder.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn trial_balance(&self, as_of: NaiveDate) -> Result<TrialBalanceReport, ReportError> {
        let accounts = self.detail_accounts().await?;
        let posted_ids = self.posted_entry_ids(Some(as_of)).await?;

        let mut activities = Vec::with_capacity(accounts.len());
        for model in accounts {
            let (period_debit, period_credit) =
                self.period_sums(model.id, &posted_ids).await?;
            activities.push(AccountActivity {
                account_id: model.id.into(),
                code: model.code,
                name: model.name,
                account_type: model.account_type.into(),
                opening_debit: model.opening_debit,
                opening_credit: model.opening_credit,
                period_debit,
                period_credit,
            });
        }

        Ok(ReportService::build_trial_balance(as_of, activities))
    }

    /// Produces the balance sheet as of a date.
    ///
    /// Detail-account balances are grouped by code prefix (1 = current
    /// assets, 2 = fixed assets, 3 = short-term liabilities, 4 = long-term
    /// liabilities, 5 = equity) and the accounting equation is checked with
    /// exact fixed-point equality.
    ///
    /// # Errors
    ///
    /// Returns an error if a database query fails.
    pub async fn balance_sheet(&self, as_of: NaiveDate) -> Result<BalanceSheetReport, ReportError> {
        let accounts = self.detail_accounts().await?;
        let posted_ids = self.posted_entry_ids(Some(as_of)).await?;

        let mut balances = Vec::with_capacity(accounts.len());
        for model in accounts {
            let id = model.id;
            let account: Account = model.into();
            let (period_debit, period_credit) = self.period_sums(id, &posted_ids).await?;
            balances.push((
                account.code.clone(),
                account_balance(&account, period_debit, period_credit),
            ));
        }

        Ok(ReportService::build_balance_sheet(as_of, &balances))
    }

    async fn detail_accounts(&self) -> Result<Vec<accounts::Model>, ReportError> {
        Ok(accounts::Entity::find()
            .filter(accounts::Column::IsDetail.eq(true))
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await?)
    }

    /// IDs of posted entries, optionally bounded by an as-of date.
    async fn posted_entry_ids(&self, as_of: Option<NaiveDate>) -> Result<Vec<Uuid>, ReportError> {
        let mut query = journal_entries::Entity::find()
            .select_only()
            .column(journal_entries::Column::Id)
            .filter(journal_entries::Column::Status.eq(EntryStatus::Posted));
        if let Some(date) = as_of {
            query = query.filter(journal_entries::Column::EntryDate.lte(date));
        }
        Ok(query.into_tuple::<Uuid>().all(&self.db).await?)
    }

    /// Posted debit/credit sums for one account over the given entries.
    async fn period_sums(
        &self,
        account_id: Uuid,
        posted_ids: &[Uuid],
    ) -> Result<(Decimal, Decimal), ReportError> {
        if posted_ids.is_empty() {
            return Ok((Decimal::ZERO, Decimal::ZERO));
        }

        let lines = journal_lines::Entity::find()
            .filter(journal_lines::Column::AccountId.eq(account_id))
            .filter(journal_lines::Column::EntryId.is_in(posted_ids.iter().copied()))
            .all(&self.db)
            .await?;

        let mut debit = Decimal::ZERO;
        let mut credit = Decimal::ZERO;
        for line in lines {
            debit += line.debit;
            credit += line.credit;
        }
        Ok((debit, credit))
    }
}
