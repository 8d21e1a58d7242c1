//! Active enums mapped to Postgres enum types.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account classification, stored as the `account_type` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability account.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity account.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Revenue account.
    #[sea_orm(string_value = "revenue")]
    Revenue,
    /// Expense account.
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Cost account.
    #[sea_orm(string_value = "cost")]
    Cost,
}

impl From<AccountType> for kassa_core::account::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Revenue => Self::Revenue,
            AccountType::Expense => Self::Expense,
            AccountType::Cost => Self::Cost,
        }
    }
}

impl From<kassa_core::account::AccountType> for AccountType {
    fn from(value: kassa_core::account::AccountType) -> Self {
        use kassa_core::account::AccountType as Domain;
        match value {
            Domain::Asset => Self::Asset,
            Domain::Liability => Self::Liability,
            Domain::Equity => Self::Equity,
            Domain::Revenue => Self::Revenue,
            Domain::Expense => Self::Expense,
            Domain::Cost => Self::Cost,
        }
    }
}

/// Journal entry status, stored as the `entry_status` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "entry_status")]
#[serde(rename_all = "lowercase")]
pub enum EntryStatus {
    /// Entry is being drafted.
    #[sea_orm(string_value = "draft")]
    Draft,
    /// Entry has been posted.
    #[sea_orm(string_value = "posted")]
    Posted,
    /// Entry has been cancelled.
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

impl From<EntryStatus> for kassa_core::journal::EntryStatus {
    fn from(value: EntryStatus) -> Self {
        match value {
            EntryStatus::Draft => Self::Draft,
            EntryStatus::Posted => Self::Posted,
            EntryStatus::Cancelled => Self::Cancelled,
        }
    }
}

impl From<kassa_core::journal::EntryStatus> for EntryStatus {
    fn from(value: kassa_core::journal::EntryStatus) -> Self {
        use kassa_core::journal::EntryStatus as Domain;
        match value {
            Domain::Draft => Self::Draft,
            Domain::Posted => Self::Posted,
            Domain::Cancelled => Self::Cancelled,
        }
    }
}
