//! Statistics API endpoints

use api_types::stats::{CategorySpending, FinanceStatsView};
use axum::{Extension, Json, extract::State};
use engine::User;

use crate::{ServerError, server::ServerState};

/// Handle requests for user statistics of the current month
pub async fn get_stats(
    Extension(user): Extension<User>,
    State(state): State<ServerState>,
) -> Result<Json<FinanceStatsView>, ServerError> {
    let stats = state.engine.finance_stats(user.id, state.today()).await?;

    Ok(Json(FinanceStatsView {
        currency: user.currency.code().to_string(),
        balance_minor: stats.balance.cents(),
        total_income_minor: stats.total_income.cents(),
        total_expenses_minor: stats.total_expenses.cents(),
        savings_rate: stats.savings_rate,
        monthly_spending: stats
            .monthly_spending
            .iter()
            .map(|(category, amount)| CategorySpending {
                category: category.to_string(),
                amount_minor: amount.cents(),
            })
            .collect(),
    }))
}
