use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod user {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserRegister {
        pub email: String,
        pub password: String,
        pub first_name: String,
        pub last_name: String,
        /// Three letter code, `PHP` when absent.
        pub currency: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserLogin {
        pub email: String,
        pub password: String,
    }

    /// Profile fields to change. Absent or blank values keep the stored ones.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ProfileUpdate {
        pub first_name: Option<String>,
        pub last_name: Option<String>,
        pub currency: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: Uuid,
        pub email: String,
        pub first_name: String,
        pub last_name: String,
        pub currency: String,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    /// When a transaction happened.
    ///
    /// Either a calendar date (`2026-10-05`) or an RFC3339 timestamp, which
    /// the server converts to a date in its reference timezone.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum TransactionDate {
        Day(NaiveDate),
        Timestamp(DateTime<FixedOffset>),
    }

    /// Request body to create or replace a transaction.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionInput {
        pub kind: TransactionKind,
        pub amount_minor: i64,
        pub category: String,
        pub description: String,
        pub date: TransactionDate,
    }

    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionListQuery {
        pub kind: Option<TransactionKind>,
        pub category: Option<String>,
        /// 1-based.
        pub page: Option<u64>,
        pub limit: Option<u64>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub user_id: Uuid,
        pub kind: TransactionKind,
        pub amount_minor: i64,
        pub category: String,
        pub description: String,
        pub date: NaiveDate,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionListResponse {
        pub items: Vec<TransactionView>,
        pub total: u64,
        pub page: u64,
        pub pages: u64,
    }
}

pub mod budget {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum BudgetStatus {
        OnTrack,
        Warning,
        Over,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetCategoryView {
        pub name: String,
        pub limit_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetReportRowView {
        pub name: String,
        pub limit_minor: i64,
        pub spent_minor: i64,
        /// Negative when the category is over budget.
        pub remaining_minor: i64,
        pub percentage: f64,
        pub status: BudgetStatus,
    }

    /// A month's budget merged with that month's spending.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetReportView {
        pub id: Uuid,
        pub user_id: Uuid,
        /// Zero-based, January is 0.
        pub month: u32,
        pub year: i32,
        pub categories: Vec<BudgetReportRowView>,
        pub total_limit_minor: i64,
        /// Includes spending in categories the budget does not declare.
        pub total_spent_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetLimitUpdate {
        pub name: String,
        pub limit_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetLimitsUpdate {
        pub categories: Vec<BudgetLimitUpdate>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: Uuid,
        pub user_id: Uuid,
        pub month: u32,
        pub year: i32,
        pub categories: Vec<BudgetCategoryView>,
        pub total_limit_minor: i64,
    }
}

pub mod stats {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategorySpending {
        pub category: String,
        pub amount_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FinanceStatsView {
        pub currency: String,
        /// All time.
        pub balance_minor: i64,
        pub total_income_minor: i64,
        pub total_expenses_minor: i64,
        pub savings_rate: f64,
        /// Current month expenses, in the order categories first appear.
        pub monthly_spending: Vec<CategorySpending>,
    }
}
