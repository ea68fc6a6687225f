//! Transactions API endpoints

use api_types::transaction::{
    TransactionDate, TransactionInput, TransactionKind as ApiKind, TransactionListQuery,
    TransactionListResponse, TransactionView,
};
use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use chrono::NaiveDate;
use chrono_tz::Tz;
use engine::{Transaction, TransactionDraft, TransactionListFilter, User, is_known_category};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Income => ApiKind::Income,
        engine::TransactionKind::Expense => ApiKind::Expense,
    }
}

fn engine_kind(kind: ApiKind) -> engine::TransactionKind {
    match kind {
        ApiKind::Income => engine::TransactionKind::Income,
        ApiKind::Expense => engine::TransactionKind::Expense,
    }
}

fn calendar_date(date: TransactionDate, timezone: Tz) -> NaiveDate {
    match date {
        TransactionDate::Day(day) => day,
        TransactionDate::Timestamp(at) => at.with_timezone(&timezone).date_naive(),
    }
}

/// Boundary checks the engine leaves to the caller, then the engine draft.
fn draft(payload: TransactionInput, timezone: Tz) -> Result<TransactionDraft, ServerError> {
    let category = payload.category.trim();
    if !is_known_category(category) {
        return Err(ServerError::Generic(format!(
            "unknown category: {}",
            payload.category
        )));
    }

    Ok(TransactionDraft {
        kind: engine_kind(payload.kind),
        amount_minor: payload.amount_minor,
        category: category.to_string(),
        description: payload.description,
        occurred_on: calendar_date(payload.date, timezone),
    })
}

fn transaction_view(tx: Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        user_id: tx.user_id,
        kind: map_kind(tx.kind),
        amount_minor: tx.amount_minor,
        category: tx.category,
        description: tx.description,
        date: tx.occurred_on,
    }
}

pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    query: Result<Query<TransactionListQuery>, QueryRejection>,
) -> Result<Json<TransactionListResponse>, ServerError> {
    let Query(query) = query?;
    let filter = TransactionListFilter {
        kind: query.kind.map(engine_kind),
        category: query
            .category
            .map(|category| category.trim().to_string())
            .filter(|category| !category.is_empty()),
    };

    let page = state
        .engine
        .list_transactions(user.id, &filter, query.page, query.limit)
        .await?;

    Ok(Json(TransactionListResponse {
        items: page.items.into_iter().map(transaction_view).collect(),
        total: page.total,
        page: page.page,
        pages: page.pages,
    }))
}

pub async fn create(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    payload: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let Json(payload) = payload?;
    let draft = draft(payload, state.timezone)?;
    let tx = state.engine.create_transaction(user.id, draft).await?;

    Ok((StatusCode::CREATED, Json(transaction_view(tx))))
}

pub async fn update(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<TransactionInput>, JsonRejection>,
) -> Result<Json<TransactionView>, ServerError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let draft = draft(payload, state.timezone)?;
    let tx = state.engine.update_transaction(user.id, id, draft).await?;

    Ok(Json(transaction_view(tx)))
}

pub async fn delete(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<StatusCode, ServerError> {
    let Path(id) = id?;
    state.engine.delete_transaction(user.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
