use std::collections::HashMap;

use sea_orm::{
    ActiveValue, QueryFilter, QueryOrder, TransactionTrait, prelude::*,
};
use uuid::Uuid;

pub use budgets::Budget;
pub use categories::{Category, DEFAULT_COLOR, color_for};
pub use error::EngineError;
pub use money::MoneyCents;
pub use reports::{
    BudgetComparison, CategoryShare, Dashboard, MonthlyTotal, Summary, budget_vs_actual,
    category_breakdown, dashboard, monthly_totals, spending_insight,
};
pub use transactions::{NewTransaction, Transaction, TransactionPatch};
pub use util::validate_month_token;

mod budgets;
mod categories;
mod error;
mod money;
pub mod reports;
mod transactions;
mod util;

type ResultEngine<T> = Result<T, EngineError>;

/// Database-backed operations behind the dashboard and the transaction
/// ledger. Aggregation itself lives in [`reports`] as pure functions; the
/// engine only loads the inputs and stores the records.
#[derive(Clone, Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Record a new transaction and return its id.
    pub async fn add_transaction(&self, new: NewTransaction) -> ResultEngine<Uuid> {
        let tx = Transaction::new(new.title, new.amount, new.date, new.category, new.description)?;
        transactions::ActiveModel::from(&tx).insert(&self.database).await?;
        tracing::debug!(id = %tx.id, "transaction recorded");
        Ok(tx.id)
    }

    /// Return a single transaction by id.
    pub async fn transaction(&self, id: Uuid) -> ResultEngine<Transaction> {
        let model = transactions::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))?;
        Transaction::try_from(model)
    }

    /// Return every transaction, oldest first.
    pub async fn transactions(&self) -> ResultEngine<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .order_by_asc(transactions::Column::Date)
            .all(&self.database)
            .await?;

        models.into_iter().map(Transaction::try_from).collect()
    }

    /// Apply a partial update to a transaction, returning the merged result.
    ///
    /// Absent patch fields keep their stored values.
    pub async fn update_transaction(
        &self,
        id: Uuid,
        patch: TransactionPatch,
    ) -> ResultEngine<Transaction> {
        let model = transactions::Entity::find_by_id(id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))?;
        let mut tx = Transaction::try_from(model)?;

        if let Some(title) = patch.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(EngineError::InvalidTitle(
                    "title must not be empty".to_string(),
                ));
            }
            tx.title = title;
        }
        if let Some(amount) = patch.amount {
            if amount.is_negative() {
                return Err(EngineError::InvalidAmount(
                    "amount must be >= 0".to_string(),
                ));
            }
            tx.amount = amount;
        }
        if let Some(date) = patch.date {
            tx.date = date;
        }
        if let Some(category) = patch.category {
            tx.category = category;
        }
        if let Some(description) = patch.description {
            tx.description = util::normalize_optional_text(description.as_deref());
        }

        let mut active = transactions::ActiveModel::from(&tx);
        active.id = ActiveValue::Unchanged(id.to_string());
        active.update(&self.database).await?;
        Ok(tx)
    }

    /// Delete a transaction by id.
    pub async fn delete_transaction(&self, id: Uuid) -> ResultEngine<()> {
        let result = transactions::Entity::delete_by_id(id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(
                "transaction not exists".to_string(),
            ));
        }
        tracing::debug!(%id, "transaction deleted");
        Ok(())
    }

    /// Set the budget for a (category, month) pair.
    ///
    /// Idempotent upsert: a repeated save for the same pair replaces the
    /// amount, never duplicates the row.
    pub async fn set_budget(
        &self,
        category: Category,
        month: &str,
        amount: MoneyCents,
    ) -> ResultEngine<Budget> {
        util::validate_month_token(month)?;
        if amount.is_negative() {
            return Err(EngineError::InvalidAmount(
                "amount must be >= 0".to_string(),
            ));
        }

        let db_tx = self.database.begin().await?;

        let existing = budgets::Entity::find()
            .filter(budgets::Column::Category.eq(category.as_str()))
            .filter(budgets::Column::Month.eq(month))
            .one(&db_tx)
            .await?;

        let budget = match existing {
            Some(model) => {
                let active = budgets::ActiveModel {
                    id: ActiveValue::Unchanged(model.id.clone()),
                    amount_minor: ActiveValue::Set(amount.cents()),
                    ..Default::default()
                };
                active.update(&db_tx).await?;
                Budget {
                    id: util::parse_uuid(&model.id, "budget")?,
                    category,
                    month: month.to_string(),
                    amount,
                }
            }
            None => {
                let budget = Budget {
                    id: Uuid::new_v4(),
                    category,
                    month: month.to_string(),
                    amount,
                };
                budgets::ActiveModel::from(&budget).insert(&db_tx).await?;
                budget
            }
        };

        db_tx.commit().await?;
        Ok(budget)
    }

    /// List budgets for a month, or all budgets when no month is given.
    pub async fn budgets(&self, month: Option<&str>) -> ResultEngine<Vec<Budget>> {
        let mut query = budgets::Entity::find().order_by_asc(budgets::Column::Month);
        if let Some(month) = month {
            util::validate_month_token(month)?;
            query = query.filter(budgets::Column::Month.eq(month));
        }

        let models = query.all(&self.database).await?;
        models.into_iter().map(Budget::try_from).collect()
    }

    /// Load the current transactions plus the given month's budgets and run
    /// the aggregation pipeline over them.
    pub async fn dashboard(&self, month: &str) -> ResultEngine<Dashboard> {
        let transactions = self.transactions().await?;
        let budgets: HashMap<Category, MoneyCents> = self
            .budgets(Some(month))
            .await?
            .into_iter()
            .map(|budget| (budget.category, budget.amount))
            .collect();

        Ok(reports::dashboard(&transactions, &budgets))
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}
