//! Spending aggregation over a user's transactions.
//!
//! Everything here is pure: callers fetch the transactions, these functions
//! fold them in a single pass. Sums are kept in [`MoneyCents`], so the result
//! does not depend on the order of the input.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::{BudgetMonth, MoneyCents, Transaction};

/// Per-category totals that remember the order in which categories first appeared.
///
/// Only categories that received at least one amount are present.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    entries: Vec<(String, MoneyCents)>,
    index: HashMap<String, usize>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `category`, registering the category on first sight.
    pub fn add(&mut self, category: &str, amount: MoneyCents) {
        match self.index.get(category) {
            Some(&position) => self.entries[position].1 += amount,
            None => {
                self.index.insert(category.to_string(), self.entries.len());
                self.entries.push((category.to_string(), amount));
            }
        }
    }

    pub fn get(&self, category: &str) -> Option<MoneyCents> {
        self.index
            .get(category)
            .map(|&position| self.entries[position].1)
    }

    /// Sum over every category.
    pub fn total(&self) -> MoneyCents {
        self.entries.iter().map(|(_, amount)| *amount).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Categories and totals in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, MoneyCents)> {
        self.entries
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
    }
}

/// Expense totals per category for the transactions dated inside `period`.
pub fn monthly_spend_by_category(period: BudgetMonth, transactions: &[Transaction]) -> CategoryTotals {
    let mut totals = CategoryTotals::new();
    for tx in transactions
        .iter()
        .filter(|tx| tx.is_expense() && period.contains(tx.occurred_on))
    {
        totals.add(&tx.category, tx.amount());
    }
    totals
}

/// Month-level statistics for the month containing `today`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FinanceStats {
    /// Income dated in the current month.
    pub total_income: MoneyCents,
    /// Expenses dated in the current month.
    pub total_expenses: MoneyCents,
    /// Lifetime balance: all income minus all expenses, regardless of date.
    pub balance: MoneyCents,
    /// Share of this month's income that was not spent, in percent.
    ///
    /// `0` when there is no income; negative when spending exceeds income.
    pub savings_rate: f64,
    /// This month's expenses per category, in first-seen order.
    pub monthly_spending: CategoryTotals,
}

/// Compute [`FinanceStats`] for `today`'s month out of every transaction of a user.
///
/// Income and expense totals are restricted to the current month while the
/// balance is computed over the whole history.
pub fn finance_stats(today: NaiveDate, transactions: &[Transaction]) -> FinanceStats {
    let period = BudgetMonth::containing(today);
    let mut stats = FinanceStats::default();

    for tx in transactions {
        stats.balance += tx.signed_amount();

        if !period.contains(tx.occurred_on) {
            continue;
        }
        if tx.is_income() {
            stats.total_income += tx.amount();
        } else {
            stats.total_expenses += tx.amount();
            stats.monthly_spending.add(&tx.category, tx.amount());
        }
    }

    stats.savings_rate = savings_rate(stats.total_income, stats.total_expenses);
    stats
}

fn savings_rate(income: MoneyCents, expenses: MoneyCents) -> f64 {
    if income.is_zero() {
        return 0.0;
    }
    (income - expenses).cents() as f64 / income.cents() as f64 * 100.0
}
