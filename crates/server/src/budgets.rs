//! Budgets API endpoints

use api_types::budget::{BudgetListResponse, BudgetSet, BudgetView};
use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;

use crate::{ServerError, server::ServerState};
use engine::{Budget, Category, MoneyCents};

#[derive(Debug, Deserialize)]
pub struct BudgetListQuery {
    pub month: Option<String>,
}

fn view_from(budget: Budget) -> BudgetView {
    BudgetView {
        category: budget.category.as_str().to_string(),
        month: budget.month,
        amount: budget.amount.to_major_f64(),
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<BudgetListQuery>,
) -> Result<Json<BudgetListResponse>, ServerError> {
    let budgets = state
        .engine
        .budgets(query.month.as_deref())
        .await?
        .into_iter()
        .map(view_from)
        .collect();

    Ok(Json(BudgetListResponse { budgets }))
}

/// Upsert handler: saving twice for one (category, month) pair keeps a
/// single record with the latest amount.
pub async fn set(
    State(state): State<ServerState>,
    Json(payload): Json<BudgetSet>,
) -> Result<Json<BudgetView>, ServerError> {
    let category = Category::try_from(payload.category.as_str())?;
    let amount = MoneyCents::from_major_f64(payload.amount)?;

    let budget = state
        .engine
        .set_budget(category, &payload.month, amount)
        .await?;

    Ok(Json(view_from(budget)))
}
