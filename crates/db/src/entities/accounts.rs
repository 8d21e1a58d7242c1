//! `SeaORM` Entity for the accounts table (chart of accounts).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::AccountType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub account_type: AccountType,
    pub parent_id: Option<Uuid>,
    pub level: i16,
    pub is_detail: bool,
    pub opening_debit: Decimal,
    pub opening_credit: Decimal,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::ParentId",
        to = "Column::Id"
    )]
    Parent,
    #[sea_orm(has_many = "super::journal_lines::Entity")]
    JournalLines,
}

impl Related<super::journal_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::JournalLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for kassa_core::account::Account {
    fn from(model: Model) -> Self {
        Self {
            id: model.id.into(),
            code: model.code,
            name: model.name,
            description: model.description,
            account_type: model.account_type.into(),
            parent_id: model.parent_id.map(Into::into),
            level: model.level,
            is_detail: model.is_detail,
            opening_debit: model.opening_debit,
            opening_credit: model.opening_credit,
            is_active: model.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn model_maps_to_domain_account() {
        let id = Uuid::now_v7();
        let parent = Uuid::now_v7();
        let model = Model {
            id,
            code: "320.01".to_string(),
            name: "Domestic Suppliers".to_string(),
            description: None,
            account_type: AccountType::Liability,
            parent_id: Some(parent),
            level: 3,
            is_detail: true,
            opening_debit: dec!(0),
            opening_credit: dec!(150),
            is_active: true,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        };

        let account: kassa_core::account::Account = model.into();
        assert_eq!(account.id.into_inner(), id);
        assert_eq!(account.code, "320.01");
        assert_eq!(
            account.account_type,
            kassa_core::account::AccountType::Liability
        );
        assert_eq!(account.parent_id.map(kassa_shared::types::AccountId::into_inner), Some(parent));
        assert_eq!(account.opening_credit, dec!(150));
    }
}
