use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run, run_with_listener, spawn_with_listener};

mod budgets;
mod server;
mod statistics;
mod transactions;
mod user;

pub mod types {
    pub mod user {
        pub use api_types::user::{ProfileUpdate, UserLogin, UserRegister, UserView};
    }

    pub mod transaction {
        pub use api_types::transaction::{
            TransactionDate, TransactionInput, TransactionKind, TransactionListQuery,
            TransactionListResponse, TransactionView,
        };
    }

    pub mod budget {
        pub use api_types::budget::{
            BudgetCategoryView, BudgetLimitUpdate, BudgetLimitsUpdate, BudgetReportRowView,
            BudgetReportView, BudgetStatus, BudgetView,
        };
    }

    pub mod stats {
        pub use api_types::stats::{CategorySpending, FinanceStatsView};
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    /// Request rejected at the boundary, before reaching the engine.
    Generic(String),
    Unauthorized,
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::Password(_) | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        EngineError::InvalidAmount(_)
        | EngineError::InvalidName(_)
        | EngineError::InvalidDate(_)
        | EngineError::InvalidId(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::Password(hash_err) => {
            tracing::error!("password hashing error: {hash_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::UNPROCESSABLE_ENTITY, err),
            ServerError::Unauthorized => (StatusCode::UNAUTHORIZED, "invalid credentials".to_string()),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

impl From<PathRejection> for ServerError {
    fn from(value: PathRejection) -> Self {
        Self::Generic(value.body_text())
    }
}

impl From<QueryRejection> for ServerError {
    fn from(value: QueryRejection) -> Self {
        Self::Generic(value.body_text())
    }
}
