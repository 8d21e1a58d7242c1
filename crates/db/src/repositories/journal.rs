//! Journal repository for entry lifecycle database operations.
//!
//! Owns entry numbering, the draft -> posted -> cancelled lifecycle, and the
//! atomicity guarantees around them: an entry and its lines are always
//! persisted as a single unit, and posting/cancellation re-read the entry's
//! status inside their own transaction so concurrent state changes on the
//! same entry lose cleanly.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction,
    DbBackend, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set, Statement,
    TransactionTrait,
};
use uuid::Uuid;

use kassa_core::journal::{
    compute_totals, format_entry_no, next_sequence, validate_balanced, validate_can_cancel,
    validate_can_delete, validate_can_modify, validate_can_post, validate_lines, DocumentRef,
    JournalError as RuleError, LineInput,
};

use crate::entities::{
    accounts, journal_entries, journal_lines,
    sea_orm_active_enums::EntryStatus,
};

/// Error types for journal operations.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    /// Journal entry not found.
    #[error("Journal entry not found: {0}")]
    NotFound(Uuid),

    /// A domain rule rejected the operation.
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating a journal entry.
#[derive(Debug, Clone)]
pub struct CreateEntryInput {
    /// Entry date.
    pub entry_date: NaiveDate,
    /// Entry description.
    pub description: String,
    /// Soft pointer to the originating business document, if any.
    pub reference: Option<DocumentRef>,
    /// The entry's lines, in display order.
    pub lines: Vec<LineInput>,
    /// User creating the entry.
    pub created_by: Uuid,
}

/// Header fields editable while an entry is a draft.
#[derive(Debug, Clone, Default)]
pub struct UpdateEntryInput {
    /// Entry date.
    pub entry_date: Option<NaiveDate>,
    /// Entry description.
    pub description: Option<String>,
    /// Document reference (`Some(None)` clears it).
    pub reference: Option<Option<DocumentRef>>,
}

/// Filter options for listing entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Filter by status.
    pub status: Option<EntryStatus>,
    /// Filter by date range start.
    pub date_from: Option<NaiveDate>,
    /// Filter by date range end.
    pub date_to: Option<NaiveDate>,
    /// Filter by originating module tag.
    pub reference_type: Option<String>,
    /// Filter by originating record ID.
    pub reference_id: Option<Uuid>,
}

/// A journal entry with its lines.
#[derive(Debug, Clone)]
pub struct EntryWithLines {
    /// Entry header.
    pub entry: journal_entries::Model,
    /// Lines ordered by `line_order`.
    pub lines: Vec<journal_lines::Model>,
}

/// Journal repository for entry lifecycle operations.
#[derive(Debug, Clone)]
pub struct JournalRepository {
    db: DatabaseConnection,
    entry_prefix: String,
}

impl JournalRepository {
    /// Creates a new journal repository with the given entry number prefix.
    pub fn new(db: DatabaseConnection, entry_prefix: impl Into<String>) -> Self {
        Self {
            db,
            entry_prefix: entry_prefix.into(),
        }
    }

    /// Creates a new draft entry with its lines as a single atomic unit.
    ///
    /// The entry number is allocated from the `(prefix, year)` counter inside
    /// the same transaction, so no entry is ever observable with a partial
    /// line set or a duplicate number. Balance is NOT checked here; drafts
    /// may be incomplete.
    ///
    /// # Errors
    ///
    /// Returns an error if a line is malformed, an account reference is not
    /// an active detail account, or the database fails.
    pub async fn create_entry(
        &self,
        input: CreateEntryInput,
    ) -> Result<EntryWithLines, JournalError> {
        validate_lines(&input.lines)?;

        let txn = self.db.begin().await?;
        self.validate_accounts(&txn, &input.lines).await?;

        let entry_no = self
            .next_entry_number(&txn, input.entry_date.year())
            .await?;

        let now = Utc::now().into();
        let entry_id = Uuid::now_v7();
        let (reference_type, reference_id, reference_no) = match input.reference {
            Some(r) => (Some(r.reference_type), Some(r.reference_id), r.reference_no),
            None => (None, None, None),
        };

        let entry = journal_entries::ActiveModel {
            id: Set(entry_id),
            entry_no: Set(entry_no),
            entry_date: Set(input.entry_date),
            description: Set(input.description),
            reference_type: Set(reference_type),
            reference_id: Set(reference_id),
            reference_no: Set(reference_no),
            status: Set(EntryStatus::Draft),
            created_by: Set(input.created_by),
            created_at: Set(now),
            posted_by: Set(None),
            posted_at: Set(None),
            cancelled_by: Set(None),
            cancelled_at: Set(None),
            cancel_reason: Set(None),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let lines = Self::insert_lines(&txn, entry_id, &input.lines).await?;

        txn.commit().await?;
        tracing::info!(entry_no = %entry.entry_no, lines = lines.len(), "journal entry created");

        Ok(EntryWithLines { entry, lines })
    }

    /// Gets an entry with its lines.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::NotFound`] if the entry does not exist.
    pub async fn get_entry(&self, id: Uuid) -> Result<EntryWithLines, JournalError> {
        let entry = journal_entries::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(JournalError::NotFound(id))?;

        let lines = journal_lines::Entity::find()
            .filter(journal_lines::Column::EntryId.eq(id))
            .order_by_asc(journal_lines::Column::LineOrder)
            .all(&self.db)
            .await?;

        Ok(EntryWithLines { entry, lines })
    }

    /// Lists entries with optional filters, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_entries(
        &self,
        filter: EntryFilter,
    ) -> Result<Vec<journal_entries::Model>, JournalError> {
        let mut query = journal_entries::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(journal_entries::Column::Status.eq(status));
        }
        if let Some(date_from) = filter.date_from {
            query = query.filter(journal_entries::Column::EntryDate.gte(date_from));
        }
        if let Some(date_to) = filter.date_to {
            query = query.filter(journal_entries::Column::EntryDate.lte(date_to));
        }
        if let Some(reference_type) = filter.reference_type {
            query = query.filter(journal_entries::Column::ReferenceType.eq(reference_type));
        }
        if let Some(reference_id) = filter.reference_id {
            query = query.filter(journal_entries::Column::ReferenceId.eq(reference_id));
        }

        Ok(query
            .order_by_desc(journal_entries::Column::EntryDate)
            .order_by_desc(journal_entries::Column::EntryNo)
            .all(&self.db)
            .await?)
    }

    /// Updates a draft entry's header and, optionally, replaces its lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is missing or not a draft, or if the
    /// replacement lines are invalid.
    pub async fn update_entry(
        &self,
        id: Uuid,
        patch: UpdateEntryInput,
        new_lines: Option<Vec<LineInput>>,
    ) -> Result<EntryWithLines, JournalError> {
        let txn = self.db.begin().await?;

        let entry = journal_entries::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(JournalError::NotFound(id))?;
        validate_can_modify(entry.status.into())?;

        if let Some(lines) = &new_lines {
            validate_lines(lines)?;
            self.validate_accounts(&txn, lines).await?;
        }

        let entry_id = entry.id;
        let mut active: journal_entries::ActiveModel = entry.into();
        if let Some(entry_date) = patch.entry_date {
            active.entry_date = Set(entry_date);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(reference) = patch.reference {
            let (reference_type, reference_id, reference_no) = match reference {
                Some(r) => (Some(r.reference_type), Some(r.reference_id), r.reference_no),
                None => (None, None, None),
            };
            active.reference_type = Set(reference_type);
            active.reference_id = Set(reference_id);
            active.reference_no = Set(reference_no);
        }
        active.updated_at = Set(Utc::now().into());
        let entry = active.update(&txn).await?;

        let lines = if let Some(lines) = new_lines {
            journal_lines::Entity::delete_many()
                .filter(journal_lines::Column::EntryId.eq(entry_id))
                .exec(&txn)
                .await?;
            Self::insert_lines(&txn, entry_id, &lines).await?
        } else {
            journal_lines::Entity::find()
                .filter(journal_lines::Column::EntryId.eq(entry_id))
                .order_by_asc(journal_lines::Column::LineOrder)
                .all(&txn)
                .await?
        };

        txn.commit().await?;
        Ok(EntryWithLines { entry, lines })
    }

    /// Deletes a draft entry and its lines.
    ///
    /// # Errors
    ///
    /// Returns an error unless the entry exists and is a draft.
    pub async fn delete_entry(&self, id: Uuid) -> Result<(), JournalError> {
        let txn = self.db.begin().await?;

        let entry = journal_entries::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(JournalError::NotFound(id))?;
        validate_can_delete(entry.status.into())?;

        journal_entries::Entity::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;
        tracing::info!(entry_no = %entry.entry_no, "draft entry deleted");
        Ok(())
    }

    /// Posts a draft entry.
    ///
    /// Runs in a single transaction: the status is re-read to guard against a
    /// concurrent post/cancel, the lines must balance exactly, and the status
    /// change and audit stamp commit atomically. Once posted, the entry's
    /// lines are immutable.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is missing, not a draft, or unbalanced
    /// (the error carries both totals).
    pub async fn post_entry(
        &self,
        id: Uuid,
        actor: Uuid,
    ) -> Result<journal_entries::Model, JournalError> {
        let txn = self.db.begin().await?;

        // Row lock on the re-read: a concurrent post/cancel of the same entry
        // serializes here and loses on the status check.
        let entry = journal_entries::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(JournalError::NotFound(id))?;
        validate_can_post(entry.status.into())?;

        let lines = journal_lines::Entity::find()
            .filter(journal_lines::Column::EntryId.eq(id))
            .all(&txn)
            .await?;
        if lines.is_empty() {
            return Err(RuleError::NoLines.into());
        }

        let totals = compute_totals(lines.iter().map(|l| (&l.debit, &l.credit)));
        validate_balanced(&totals)?;

        let now = Utc::now().into();
        let mut active: journal_entries::ActiveModel = entry.into();
        active.status = Set(EntryStatus::Posted);
        active.posted_by = Set(Some(actor));
        active.posted_at = Set(Some(now));
        active.updated_at = Set(now);
        let posted = active.update(&txn).await?;

        txn.commit().await?;
        tracing::info!(
            entry_no = %posted.entry_no,
            debit = %totals.total_debit,
            credit = %totals.total_credit,
            "journal entry posted"
        );
        Ok(posted)
    }

    /// Cancels a draft or posted entry.
    ///
    /// Lines are retained unchanged for the audit trail but are excluded from
    /// every balance and report from this point on. No reversing entry is
    /// generated; callers that need an offsetting posting must create one
    /// explicitly.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is missing or already cancelled.
    pub async fn cancel_entry(
        &self,
        id: Uuid,
        reason: String,
        actor: Uuid,
    ) -> Result<journal_entries::Model, JournalError> {
        let txn = self.db.begin().await?;

        let entry = journal_entries::Entity::find_by_id(id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or(JournalError::NotFound(id))?;
        validate_can_cancel(entry.status.into())?;

        let now = Utc::now().into();
        let mut active: journal_entries::ActiveModel = entry.into();
        active.status = Set(EntryStatus::Cancelled);
        active.cancelled_by = Set(Some(actor));
        active.cancelled_at = Set(Some(now));
        active.cancel_reason = Set(Some(reason));
        active.updated_at = Set(now);
        let cancelled = active.update(&txn).await?;

        txn.commit().await?;
        tracing::info!(entry_no = %cancelled.entry_no, "journal entry cancelled");
        Ok(cancelled)
    }

    /// Allocates the next entry number for a year.
    ///
    /// The counter row is incremented with a single atomic read-modify-write,
    /// so concurrent entry creation cannot produce duplicate numbers. The
    /// first allocation for a `(prefix, year)` seeds the counter from the
    /// highest existing entry number; an unparseable suffix degrades to
    /// sequence 1.
    async fn next_entry_number(
        &self,
        txn: &DatabaseTransaction,
        year: i32,
    ) -> Result<String, JournalError> {
        let update = Statement::from_sql_and_values(
            DbBackend::Postgres,
            "UPDATE entry_counters \
             SET last_value = last_value + 1, updated_at = now() \
             WHERE prefix = $1 AND year = $2 \
             RETURNING last_value",
            [self.entry_prefix.clone().into(), year.into()],
        );

        let sequence = if let Some(row) = txn.query_one(update).await? {
            row.try_get::<i64>("", "last_value")?
        } else {
            let last = journal_entries::Entity::find()
                .filter(
                    journal_entries::Column::EntryNo
                        .like(format!("{}-{year}-%", self.entry_prefix)),
                )
                .order_by_desc(journal_entries::Column::EntryNo)
                .one(txn)
                .await?;
            let seed = next_sequence(
                last.as_ref().map(|entry| entry.entry_no.as_str()),
                &self.entry_prefix,
                year,
            );

            let insert = Statement::from_sql_and_values(
                DbBackend::Postgres,
                "INSERT INTO entry_counters (prefix, year, last_value, updated_at) \
                 VALUES ($1, $2, $3, now()) \
                 ON CONFLICT (prefix, year) \
                 DO UPDATE SET last_value = entry_counters.last_value + 1, updated_at = now() \
                 RETURNING last_value",
                [
                    self.entry_prefix.clone().into(),
                    year.into(),
                    seed.into(),
                ],
            );
            txn.query_one(insert)
                .await?
                .ok_or_else(|| DbErr::Custom("entry counter upsert returned no row".into()))?
                .try_get::<i64>("", "last_value")?
        };

        Ok(format_entry_no(&self.entry_prefix, year, sequence))
    }

    /// Verifies every referenced account exists, is active, and is a detail
    /// account.
    async fn validate_accounts(
        &self,
        txn: &DatabaseTransaction,
        lines: &[LineInput],
    ) -> Result<(), JournalError> {
        let mut checked = HashSet::new();
        for line in lines {
            let account_id = line.account_id;
            if !checked.insert(account_id) {
                continue;
            }

            let account = accounts::Entity::find_by_id(account_id.into_inner())
                .one(txn)
                .await?
                .ok_or(RuleError::AccountNotFound(account_id))?;
            if !account.is_active {
                return Err(RuleError::AccountInactive(account_id).into());
            }
            if !account.is_detail {
                return Err(RuleError::AccountNotPostable(account_id).into());
            }
        }
        Ok(())
    }

    async fn insert_lines(
        txn: &DatabaseTransaction,
        entry_id: Uuid,
        lines: &[LineInput],
    ) -> Result<Vec<journal_lines::Model>, JournalError> {
        let now = Utc::now().into();
        let mut inserted = Vec::with_capacity(lines.len());

        for (position, line) in lines.iter().enumerate() {
            let order = i32::try_from(position)
                .map_err(|_| DbErr::Custom("too many lines in entry".into()))?
                + 1;

            let model = journal_lines::ActiveModel {
                id: Set(Uuid::now_v7()),
                entry_id: Set(entry_id),
                account_id: Set(line.account_id.into_inner()),
                line_order: Set(order),
                debit: Set(line.debit),
                credit: Set(line.credit),
                description: Set(line.description.clone()),
                created_at: Set(now),
            }
            .insert(txn)
            .await?;
            inserted.push(model);
        }

        Ok(inserted)
    }
}
