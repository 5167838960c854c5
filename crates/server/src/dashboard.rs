//! Dashboard API endpoint
//!
//! Serves the aggregated charts, the trend insight and the summary cards in
//! one response. Budgets are scoped to the requested month; the ledger is
//! always aggregated in full.

use api_types::dashboard::{
    BudgetBar, CategorySlice, DashboardResponse, MonthlyPoint, SummaryView,
};
use api_types::transaction::TransactionView;
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use serde::Deserialize;

use crate::{ServerError, server::ServerState};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    /// Month token scoping the budget comparison; defaults to the current
    /// month.
    pub month: Option<String>,
}

pub async fn get(
    State(state): State<ServerState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, ServerError> {
    let month = query
        .month
        .unwrap_or_else(|| Utc::now().format("%Y-%m").to_string());

    let dashboard = state.engine.dashboard(&month).await?;

    let monthly = dashboard
        .monthly
        .into_iter()
        .map(|bucket| MonthlyPoint {
            month: bucket.month,
            amount: bucket.total.to_major_f64(),
        })
        .collect();

    let categories = dashboard
        .categories
        .into_iter()
        .map(|share| CategorySlice {
            name: share.name.to_string(),
            percentage: share.percentage,
            color: share.color.to_string(),
        })
        .collect();

    let budget_vs_actual = dashboard
        .budget_vs_actual
        .into_iter()
        .map(|row| BudgetBar {
            category: row.category.as_str().to_string(),
            budgeted: row.budgeted.to_major_f64(),
            actual: row.actual.to_major_f64(),
        })
        .collect();

    let recent = dashboard
        .recent
        .into_iter()
        .map(|tx| TransactionView {
            id: tx.id,
            title: tx.title,
            amount: tx.amount.to_major_f64(),
            date: tx.date,
            category: tx.category.as_str().to_string(),
            description: tx.description,
        })
        .collect();

    Ok(Json(DashboardResponse {
        monthly,
        categories,
        budget_vs_actual,
        insight: dashboard.insight,
        summary: SummaryView {
            total_spent: dashboard.summary.total_spent.to_major_f64(),
            transaction_count: dashboard.summary.transaction_count as u64,
            category_count: dashboard.summary.category_count as u64,
        },
        recent,
    }))
}
