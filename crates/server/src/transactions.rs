//! Transactions API endpoints

use api_types::transaction::{
    TransactionCreated, TransactionListResponse, TransactionNew, TransactionUpdate,
    TransactionView,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};
use engine::{Category, MoneyCents, NewTransaction, Transaction, TransactionPatch};

fn view_from(tx: Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        title: tx.title,
        amount: tx.amount.to_major_f64(),
        date: tx.date,
        category: tx.category.as_str().to_string(),
        description: tx.description,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let transactions = state
        .engine
        .transactions()
        .await?
        .into_iter()
        .map(view_from)
        .collect();

    Ok(Json(TransactionListResponse { transactions }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TransactionNew>,
) -> Result<(StatusCode, Json<TransactionCreated>), ServerError> {
    let id = state
        .engine
        .add_transaction(NewTransaction {
            title: payload.title,
            amount: MoneyCents::from_major_f64(payload.amount)?,
            date: payload.date,
            category: Category::try_from(payload.category.as_str())?,
            description: payload.description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TransactionCreated { id })))
}

pub async fn get_detail(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TransactionView>, ServerError> {
    let tx = state.engine.transaction(id).await?;
    Ok(Json(view_from(tx)))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransactionUpdate>,
) -> Result<Json<TransactionView>, ServerError> {
    let amount = payload
        .amount
        .map(MoneyCents::from_major_f64)
        .transpose()?;
    let category = payload
        .category
        .as_deref()
        .map(Category::try_from)
        .transpose()?;

    let patch = TransactionPatch {
        title: payload.title,
        amount,
        date: payload.date,
        category,
        description: payload.description,
    };

    let tx = state.engine.update_transaction(id, patch).await?;
    Ok(Json(view_from(tx)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_transaction(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
