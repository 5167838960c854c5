//! Transaction primitives.
//!
//! A `Transaction` is a single recorded expense/income event: an amount on
//! a calendar date, filed under one of the fixed categories.

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Category, EngineError, MoneyCents, ResultEngine,
    util::{normalize_optional_text, parse_uuid},
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub title: String,
    pub amount: MoneyCents,
    pub date: NaiveDate,
    pub category: Category,
    pub description: Option<String>,
}

impl Transaction {
    pub fn new(
        title: String,
        amount: MoneyCents,
        date: NaiveDate,
        category: Category,
        description: Option<String>,
    ) -> ResultEngine<Self> {
        let title = title.trim().to_string();
        if title.is_empty() {
            return Err(EngineError::InvalidTitle(
                "title must not be empty".to_string(),
            ));
        }
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "amount must be >= 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            amount,
            date,
            category,
            description: normalize_optional_text(description.as_deref()),
        })
    }
}

/// Payload for creating a transaction.
#[derive(Clone, Debug)]
pub struct NewTransaction {
    pub title: String,
    pub amount: MoneyCents,
    pub date: NaiveDate,
    pub category: Category,
    pub description: Option<String>,
}

/// Partial update for an existing transaction.
///
/// Every field is independently optional; `None` keeps the stored value.
/// `description` distinguishes "leave unchanged" (`None`) from "clear"
/// (`Some(None)`).
#[derive(Clone, Debug, Default)]
pub struct TransactionPatch {
    pub title: Option<String>,
    pub amount: Option<MoneyCents>,
    pub date: Option<NaiveDate>,
    pub category: Option<Category>,
    pub description: Option<Option<String>>,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub title: String,
    pub amount_minor: i64,
    pub date: Date,
    pub category: String,
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id.to_string()),
            title: ActiveValue::Set(tx.title.clone()),
            amount_minor: ActiveValue::Set(tx.amount.cents()),
            date: ActiveValue::Set(tx.date),
            category: ActiveValue::Set(tx.category.as_str().to_string()),
            description: ActiveValue::Set(tx.description.clone()),
        }
    }
}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "transaction")?,
            title: model.title,
            amount: MoneyCents::new(model.amount_minor),
            date: model.date,
            category: Category::try_from(model.category.as_str())?,
            description: model.description,
        })
    }
}
