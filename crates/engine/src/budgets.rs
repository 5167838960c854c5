//! Budget primitives.
//!
//! A `Budget` is a spending ceiling for one category in one calendar month.
//! The (category, month) pair is the natural key: saving again for the same
//! pair replaces the amount instead of adding a row.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Category, EngineError, MoneyCents, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub category: Category,
    /// Month token in `YYYY-MM` form.
    pub month: String,
    pub amount: MoneyCents,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub category: String,
    pub month: String,
    pub amount_minor: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Budget> for ActiveModel {
    fn from(budget: &Budget) -> Self {
        Self {
            id: ActiveValue::Set(budget.id.to_string()),
            category: ActiveValue::Set(budget.category.as_str().to_string()),
            month: ActiveValue::Set(budget.month.clone()),
            amount_minor: ActiveValue::Set(budget.amount.cents()),
        }
    }
}

impl TryFrom<Model> for Budget {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "budget")?,
            category: Category::try_from(model.category.as_str())?,
            month: model.month,
            amount: MoneyCents::new(model.amount_minor),
        })
    }
}
