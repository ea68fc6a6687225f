//! Known transaction categories.
//!
//! Transactions are validated against this set at the API boundary. Budgets
//! are free to declare any category name.

pub const KNOWN_CATEGORIES: [&str; 13] = [
    "Groceries",
    "Transport",
    "Housing",
    "Food",
    "Clothing",
    "Health",
    "Education",
    "Gifts",
    "Entertainment",
    "Travel",
    "Salary",
    "Investment",
    "Savings",
];

/// Returns `true` when `name` is one of the known categories (exact match).
pub fn is_known_category(name: &str) -> bool {
    KNOWN_CATEGORIES.contains(&name)
}
