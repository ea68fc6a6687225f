use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

/// Signed money amount represented as **integer minor units** (cents).
///
/// Every amount the engine sums (transaction amounts, budget limits, report
/// totals) goes through this type so aggregation never drifts the way
/// floating-point addition would.
///
/// The value is signed: limits and transaction amounts are never negative,
/// but derived values such as `remaining` or a balance can be.
///
/// Arithmetic saturates at the `i64` bounds instead of overflowing.
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let spent = MoneyCents::new(200_00) + MoneyCents::new(100_00);
/// assert_eq!(spent.cents(), 30_000);
/// assert_eq!((MoneyCents::new(150_00) - spent).to_string(), "-150.00");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is negative.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// `self` as a percentage of `whole`, or `0.0` when `whole` is not positive.
    #[must_use]
    pub fn percent_of(self, whole: MoneyCents) -> f64 {
        if whole.is_positive() {
            self.0 as f64 / whole.0 as f64 * 100.0
        } else {
            0.0
        }
    }
}

/// Plain decimal rendering in major units, without any currency symbol.
impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for MoneyCents {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<MoneyCents> for i64 {
    fn from(value: MoneyCents) -> Self {
        value.0
    }
}

impl Add for MoneyCents {
    type Output = MoneyCents;

    fn add(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for MoneyCents {
    fn add_assign(&mut self, rhs: MoneyCents) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for MoneyCents {
    type Output = MoneyCents;

    fn sub(self, rhs: MoneyCents) -> Self::Output {
        MoneyCents(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for MoneyCents {
    fn sub_assign(&mut self, rhs: MoneyCents) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for MoneyCents {
    type Output = MoneyCents;

    fn neg(self) -> Self::Output {
        MoneyCents(self.0.saturating_neg())
    }
}

impl Sum for MoneyCents {
    fn sum<I: Iterator<Item = MoneyCents>>(iter: I) -> Self {
        iter.fold(MoneyCents::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_plain_decimal() {
        assert_eq!(MoneyCents::new(0).to_string(), "0.00");
        assert_eq!(MoneyCents::new(1).to_string(), "0.01");
        assert_eq!(MoneyCents::new(1050).to_string(), "10.50");
        assert_eq!(MoneyCents::new(-1050).to_string(), "-10.50");
    }

    #[test]
    fn percent_of_handles_zero_whole() {
        assert_eq!(MoneyCents::new(200).percent_of(MoneyCents::new(400)), 50.0);
        assert_eq!(MoneyCents::new(200).percent_of(MoneyCents::ZERO), 0.0);
    }

    #[test]
    fn sum_of_amounts() {
        let total: MoneyCents = [100, 250, -50].into_iter().map(MoneyCents::new).sum();
        assert_eq!(total, MoneyCents::new(300));
    }

    #[test]
    fn arithmetic_saturates() {
        let max = MoneyCents::new(i64::MAX);
        assert_eq!(max + MoneyCents::new(1), max);
        assert_eq!(MoneyCents::new(i64::MIN) - MoneyCents::new(1), MoneyCents::new(i64::MIN));
        assert_eq!(-MoneyCents::new(i64::MIN), max);

        let mut total = max;
        total += max;
        assert_eq!(total, max);

        let sum: MoneyCents = [max, max, MoneyCents::new(5)].into_iter().sum();
        assert_eq!(sum, max);
    }
}
