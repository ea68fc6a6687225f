//! Budget report: a budget's limits merged with the month's actual spending.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Budget, BudgetMonth, CategoryTotals, MoneyCents};

/// Spending level of a category against its limit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Over,
}

impl BudgetStatus {
    const WARNING_PERCENTAGE: f64 = 75.0;
    const OVER_PERCENTAGE: f64 = 100.0;

    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= Self::OVER_PERCENTAGE {
            Self::Over
        } else if percentage > Self::WARNING_PERCENTAGE {
            Self::Warning
        } else {
            Self::OnTrack
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::OnTrack => "on_track",
            Self::Warning => "warning",
            Self::Over => "over",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BudgetReportRow {
    pub name: String,
    pub limit: MoneyCents,
    pub spent: MoneyCents,
    /// `limit - spent`; negative when over budget.
    pub remaining: MoneyCents,
    /// `spent / limit * 100`, or `0` for a zero limit.
    pub percentage: f64,
    pub status: BudgetStatus,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BudgetReport {
    pub budget_id: Uuid,
    pub user_id: Uuid,
    pub period: BudgetMonth,
    pub rows: Vec<BudgetReportRow>,
    pub total_limit: MoneyCents,
    pub total_spent: MoneyCents,
}

impl BudgetReport {
    /// Merge `budget` with the spending of the same month.
    ///
    /// Rows exist only for categories declared in the budget. `total_spent`
    /// sums every category in `spend`, including undeclared ones, so it can
    /// exceed the sum of the rows' `spent`.
    pub fn merge(budget: &Budget, spend: &CategoryTotals) -> Self {
        let rows = budget
            .categories
            .iter()
            .map(|category| {
                let limit = category.limit();
                let spent = spend.get(&category.name).unwrap_or(MoneyCents::ZERO);
                let percentage = spent.percent_of(limit);
                BudgetReportRow {
                    name: category.name.clone(),
                    limit,
                    spent,
                    remaining: limit - spent,
                    percentage,
                    status: BudgetStatus::from_percentage(percentage),
                }
            })
            .collect();

        Self {
            budget_id: budget.id,
            user_id: budget.user_id,
            period: budget.period,
            rows,
            total_limit: budget.total_limit(),
            total_spent: spend.total(),
        }
    }

    pub fn row(&self, name: &str) -> Option<&BudgetReportRow> {
        self.rows.iter().find(|row| row.name == name)
    }
}
