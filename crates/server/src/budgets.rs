//! Budget API endpoints

use api_types::budget::{
    BudgetCategoryView, BudgetLimitsUpdate, BudgetReportRowView, BudgetReportView,
    BudgetStatus as ApiStatus, BudgetView,
};
use axum::{
    Extension, Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};
use engine::{Budget, BudgetMonth, BudgetReport, BudgetStatus, LimitUpdate, User};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_status(status: BudgetStatus) -> ApiStatus {
    match status {
        BudgetStatus::OnTrack => ApiStatus::OnTrack,
        BudgetStatus::Warning => ApiStatus::Warning,
        BudgetStatus::Over => ApiStatus::Over,
    }
}

fn report_view(report: BudgetReport) -> BudgetReportView {
    BudgetReportView {
        id: report.budget_id,
        user_id: report.user_id,
        month: report.period.month(),
        year: report.period.year(),
        categories: report
            .rows
            .into_iter()
            .map(|row| BudgetReportRowView {
                name: row.name,
                limit_minor: row.limit.cents(),
                spent_minor: row.spent.cents(),
                remaining_minor: row.remaining.cents(),
                percentage: row.percentage,
                status: map_status(row.status),
            })
            .collect(),
        total_limit_minor: report.total_limit.cents(),
        total_spent_minor: report.total_spent.cents(),
    }
}

fn budget_view(budget: Budget) -> BudgetView {
    let total_limit_minor = budget.total_limit().cents();
    BudgetView {
        id: budget.id,
        user_id: budget.user_id,
        month: budget.period.month(),
        year: budget.period.year(),
        categories: budget
            .categories
            .into_iter()
            .map(|category| BudgetCategoryView {
                name: category.name,
                limit_minor: category.limit_minor,
            })
            .collect(),
        total_limit_minor,
    }
}

/// The current month's report, created with the default limits on first access.
pub async fn list(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<Vec<BudgetReportView>>, ServerError> {
    let period = BudgetMonth::containing(state.today());
    let report = state.engine.budget_report(user.id, period).await?;

    Ok(Json(vec![report_view(report)]))
}

pub async fn update_limits(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<BudgetLimitsUpdate>, JsonRejection>,
) -> Result<Json<BudgetView>, ServerError> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    let updates: Vec<LimitUpdate> = payload
        .categories
        .into_iter()
        .map(|update| LimitUpdate {
            name: update.name,
            limit_minor: update.limit_minor,
        })
        .collect();

    let budget = state
        .engine
        .apply_limit_updates(id, user.id, &updates)
        .await?;

    Ok(Json(budget_view(budget)))
}
