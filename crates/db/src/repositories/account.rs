//! Account repository for chart of accounts database operations.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use kassa_core::account::{
    account_balance, build_tree, standard_chart, Account, AccountNode, CreateAccountInput,
    UpdateAccountInput,
};

use crate::entities::{
    accounts, journal_entries, journal_lines,
    sea_orm_active_enums::EntryStatus,
};

/// Error types for account operations.
#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    /// Account code already exists.
    #[error("Account code '{0}' already exists")]
    DuplicateCode(String),

    /// Parent account not found.
    #[error("Parent account not found: {0}")]
    ParentNotFound(Uuid),

    /// Account not found.
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    /// Cannot delete account because journal lines reference it.
    #[error("Cannot delete account: {lines} journal lines reference it")]
    DeletionBlocked {
        /// Number of referencing journal lines.
        lines: u64,
    },

    /// Input failed a structural constraint.
    #[error("Invalid account input: {0}")]
    Validation(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Account repository for chart-of-accounts operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    db: DatabaseConnection,
}

impl AccountRepository {
    /// Creates a new account repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns an error if the code already exists, the parent does not
    /// exist, the input is structurally invalid, or the database fails.
    pub async fn create_account(
        &self,
        input: CreateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        if let Some(violation) = input.validate() {
            return Err(AccountError::Validation(violation));
        }

        let existing = accounts::Entity::find()
            .filter(accounts::Column::Code.eq(&input.code))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(AccountError::DuplicateCode(input.code));
        }

        // The parent must already exist; this keeps the parent graph acyclic.
        if let Some(parent_id) = input.parent_id {
            let parent = accounts::Entity::find_by_id(parent_id.into_inner())
                .one(&self.db)
                .await?;
            if parent.is_none() {
                return Err(AccountError::ParentNotFound(parent_id.into_inner()));
            }
        }

        let now = Utc::now().into();
        let model = accounts::ActiveModel {
            id: Set(Uuid::now_v7()),
            code: Set(input.code),
            name: Set(input.name),
            description: Set(input.description),
            account_type: Set(input.account_type.into()),
            parent_id: Set(input.parent_id.map(kassa_shared::types::AccountId::into_inner)),
            level: Set(input.level),
            is_detail: Set(input.is_detail),
            opening_debit: Set(input.opening_debit),
            opening_credit: Set(input.opening_credit),
            is_active: Set(input.is_active),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let created = model.insert(&self.db).await?;
        tracing::info!(code = %created.code, "account created");
        Ok(created)
    }

    /// Gets an account by ID, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<accounts::Model>, AccountError> {
        Ok(accounts::Entity::find_by_id(id).one(&self.db).await?)
    }

    /// Gets an account by code, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_by_code(&self, code: &str) -> Result<Option<accounts::Model>, AccountError> {
        Ok(accounts::Entity::find()
            .filter(accounts::Column::Code.eq(code))
            .one(&self.db)
            .await?)
    }

    /// Gets an account by ID, failing if absent.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if the account does not exist.
    pub async fn require(&self, id: Uuid) -> Result<accounts::Model, AccountError> {
        self.get_by_id(id).await?.ok_or(AccountError::NotFound(id))
    }

    /// Lists all accounts ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_accounts(&self) -> Result<Vec<accounts::Model>, AccountError> {
        Ok(accounts::Entity::find()
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await?)
    }

    /// Builds the nested account tree from the flat account set.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn account_tree(&self) -> Result<Vec<AccountNode>, AccountError> {
        let accounts: Vec<Account> = self
            .list_accounts()
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(build_tree(&accounts))
    }

    /// Applies a whitelist patch to an account.
    ///
    /// Only the fields enumerated by [`UpdateAccountInput`] can change.
    ///
    /// # Errors
    ///
    /// Returns an error if the account is missing, a new code collides, or a
    /// new parent does not exist.
    pub async fn update_account(
        &self,
        id: Uuid,
        patch: UpdateAccountInput,
    ) -> Result<accounts::Model, AccountError> {
        let account = self.require(id).await?;

        if let Some(code) = &patch.code {
            if code.trim().is_empty() {
                return Err(AccountError::Validation("account code must not be empty".into()));
            }
            if *code != account.code {
                let clash = accounts::Entity::find()
                    .filter(accounts::Column::Code.eq(code))
                    .one(&self.db)
                    .await?;
                if clash.is_some() {
                    return Err(AccountError::DuplicateCode(code.clone()));
                }
            }
        }

        if let Some(Some(parent_id)) = patch.parent_id {
            let parent_id = parent_id.into_inner();
            if parent_id == id {
                return Err(AccountError::Validation(
                    "account cannot be its own parent".into(),
                ));
            }
            let parent = accounts::Entity::find_by_id(parent_id).one(&self.db).await?;
            if parent.is_none() {
                return Err(AccountError::ParentNotFound(parent_id));
            }
        }

        let mut active: accounts::ActiveModel = account.into();
        if let Some(code) = patch.code {
            active.code = Set(code);
        }
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(description) = patch.description {
            active.description = Set(description);
        }
        if let Some(account_type) = patch.account_type {
            active.account_type = Set(account_type.into());
        }
        if let Some(parent_id) = patch.parent_id {
            active.parent_id = Set(parent_id.map(kassa_shared::types::AccountId::into_inner));
        }
        if let Some(level) = patch.level {
            active.level = Set(level);
        }
        if let Some(is_detail) = patch.is_detail {
            active.is_detail = Set(is_detail);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        active.updated_at = Set(Utc::now().into());

        Ok(active.update(&self.db).await?)
    }

    /// Deletes an account that has no journal lines.
    ///
    /// This is a hard delete: accounts with no activity carry no audit
    /// burden. Accounts referenced by any journal line cannot be removed.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::DeletionBlocked`] carrying the referencing
    /// line count if any journal line references the account.
    pub async fn delete_account(&self, id: Uuid) -> Result<(), AccountError> {
        let account = self.require(id).await?;

        let lines = journal_lines::Entity::find()
            .filter(journal_lines::Column::AccountId.eq(id))
            .count(&self.db)
            .await?;
        if lines > 0 {
            return Err(AccountError::DeletionBlocked { lines });
        }

        accounts::Entity::delete_by_id(id).exec(&self.db).await?;
        tracing::info!(code = %account.code, "account deleted");
        Ok(())
    }

    /// Computes an account's balance as of a date.
    ///
    /// Openings plus posted activity, signed per the account type's normal
    /// side; the arithmetic lives in one place in the core crate.
    ///
    /// # Errors
    ///
    /// Returns [`AccountError::NotFound`] if the account does not exist.
    pub async fn account_balance(
        &self,
        id: Uuid,
        as_of: Option<NaiveDate>,
    ) -> Result<Decimal, AccountError> {
        let account: Account = self.require(id).await?.into();
        let posted_ids = self.posted_entry_ids(as_of).await?;
        let (period_debit, period_credit) = self.period_sums(id, &posted_ids).await?;
        Ok(account_balance(&account, period_debit, period_credit))
    }

    /// Sums signed balances over detail accounts whose code starts with
    /// `prefix`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn sum_by_code_prefix(
        &self,
        prefix: &str,
        as_of: Option<NaiveDate>,
    ) -> Result<Decimal, AccountError> {
        let accounts = accounts::Entity::find()
            .filter(accounts::Column::IsDetail.eq(true))
            .filter(accounts::Column::Code.like(format!("{prefix}%")))
            .all(&self.db)
            .await?;

        let posted_ids = self.posted_entry_ids(as_of).await?;

        let mut total = Decimal::ZERO;
        for model in accounts {
            let id = model.id;
            let account: Account = model.into();
            let (period_debit, period_credit) = self.period_sums(id, &posted_ids).await?;
            total += account_balance(&account, period_debit, period_credit);
        }
        Ok(total)
    }

    /// Seeds the built-in standard chart of accounts.
    ///
    /// Skipped entirely (no partial merge) if any account already exists.
    /// Returns true if the chart was seeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn seed_standard_chart(&self) -> Result<bool, AccountError> {
        let existing = accounts::Entity::find().count(&self.db).await?;
        if existing > 0 {
            tracing::debug!(existing, "chart already populated, seed skipped");
            return Ok(false);
        }

        let txn = self.db.begin().await?;
        let now = Utc::now();
        let mut ids_by_code = std::collections::HashMap::new();

        for seed in standard_chart() {
            let parent_id = match seed.parent_code {
                Some(code) => Some(*ids_by_code.get(code).ok_or_else(|| {
                    AccountError::Validation(format!("seed parent '{code}' missing"))
                })?),
                None => None,
            };

            let id = Uuid::now_v7();
            ids_by_code.insert(seed.code, id);

            let model = accounts::ActiveModel {
                id: Set(id),
                code: Set(seed.code.to_string()),
                name: Set(seed.name.to_string()),
                description: Set(None),
                account_type: Set(seed.account_type.into()),
                parent_id: Set(parent_id),
                level: Set(seed.level),
                is_detail: Set(seed.is_detail),
                opening_debit: Set(Decimal::ZERO),
                opening_credit: Set(Decimal::ZERO),
                is_active: Set(true),
                created_at: Set(now.into()),
                updated_at: Set(now.into()),
            };
            model.insert(&txn).await?;
        }

        txn.commit().await?;
        tracing::info!(accounts = standard_chart().len(), "standard chart seeded");
        Ok(true)
    }

    /// IDs of posted entries, optionally bounded by an as-of date.
    async fn posted_entry_ids(&self, as_of: Option<NaiveDate>) -> Result<Vec<Uuid>, AccountError> {
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
    ) -> Result<(Decimal, Decimal), AccountError> {
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
