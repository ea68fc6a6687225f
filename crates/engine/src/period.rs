//! Calendar months used to scope budgets and monthly statistics.

use chrono::{Datelike, Months, NaiveDate};

use crate::{EngineError, ResultEngine};

/// A calendar month of a given year.
///
/// The month is **zero-based** (`0` = January, `11` = December), matching the
/// way budgets are stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BudgetMonth {
    first_day: NaiveDate,
}

impl BudgetMonth {
    /// Builds a month from a zero-based month index and a four-digit year.
    pub fn new(month: u32, year: i32) -> ResultEngine<Self> {
        if month > 11 {
            return Err(EngineError::InvalidDate(format!(
                "month must be between 0 and 11, got {month}"
            )));
        }
        if !(1000..=9999).contains(&year) {
            return Err(EngineError::InvalidDate(format!(
                "year must have four digits, got {year}"
            )));
        }
        let first_day = NaiveDate::from_ymd_opt(year, month + 1, 1)
            .ok_or_else(|| EngineError::InvalidDate(format!("invalid month {month}/{year}")))?;
        Ok(Self { first_day })
    }

    /// The month `date` falls in.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// Zero-based month index.
    pub fn month(&self) -> u32 {
        self.first_day.month0()
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    pub fn last_day(&self) -> NaiveDate {
        self.first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// Inclusive calendar-day containment.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day && date <= self.last_day()
    }

    pub fn previous(&self) -> Self {
        Self::containing(
            self.first_day
                .checked_sub_months(Months::new(1))
                .unwrap_or(self.first_day),
        )
    }
}

impl core::fmt::Display for BudgetMonth {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month() + 1)
    }
}
