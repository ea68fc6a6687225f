//! Budget and spending engine.
//!
//! Pure aggregation lives in [`monthly_spend_by_category`], [`finance_stats`] and
//! [`BudgetReport::merge`]; [`Engine`] wraps the
//! database and exposes the per-user operations (budgets, transactions,
//! statistics, users).

pub use budgets::{Budget, BudgetCategory, DEFAULT_CATEGORIES, LimitUpdate};
pub use categories::{KNOWN_CATEGORIES, is_known_category};
pub use currency::CurrencyCode;
pub use error::EngineError;
pub use money::MoneyCents;
pub use ops::{Engine, EngineBuilder, TransactionListFilter, TransactionPage};
pub use period::BudgetMonth;
pub use report::{BudgetReport, BudgetReportRow, BudgetStatus};
pub use spending::{CategoryTotals, FinanceStats, finance_stats, monthly_spend_by_category};
pub use transactions::{Transaction, TransactionDraft, TransactionKind};
pub use users::{NewUser, ProfileChanges, User};

mod budget_categories;
mod budgets;
mod categories;
mod currency;
mod error;
mod money;
mod ops;
mod period;
mod report;
mod spending;
mod transactions;
mod users;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
