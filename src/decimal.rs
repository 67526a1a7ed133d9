use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Sub, SubAssign};
use std::str::FromStr;

use crate::errors::PlannerError;

/// Money type with 8 decimal places precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(8))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp(8)))
    }

    /// create from integer amount (yuan, dollars, euros)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round to specified decimal places
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp(dp))
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// strictly less than zero
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// absolute value
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// minimum of two values
    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// maximum of two values
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// apply a fractional rate (e.g. 0.01 of the amount)
    pub fn apply_rate(&self, rate: Rate) -> Self {
        Money((self.0 * rate.as_decimal()).round_dp(8))
    }

    /// format with a currency symbol, thousands separators and 2 decimal places
    pub fn format_currency(&self, symbol: &str) -> String {
        let rounded = self.0.round_dp(2);
        let text = format!("{:.2}", rounded.abs());
        let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if rounded < Decimal::ZERO { "-" } else { "" };
        format!("{sign}{symbol}{grouped}.{fraction}")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money((self.0 + other.0).round_dp(8))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = (self.0 + other.0).round_dp(8);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money((self.0 - other.0).round_dp(8))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 = (self.0 - other.0).round_dp(8);
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money((self.0 * other).round_dp(8))
    }
}

/// panics on a zero divisor like `Decimal` does; callers check first
impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money((self.0 / other).round_dp(8))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + *x)
    }
}

/// rate type for interest rates, fee rates and growth rates
///
/// stored as a fraction: 3.2% is held as 0.032
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from decimal fraction (e.g., 0.05 for 5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from percentage (e.g., 3.2 for 3.2%)
    pub fn from_percent(p: Decimal) -> Self {
        Rate(p / Decimal::ONE_HUNDRED)
    }

    /// create from whole percentage (e.g., 5 for 5%)
    pub fn from_percentage(p: u32) -> Self {
        Rate(Decimal::from(p) / Decimal::ONE_HUNDRED)
    }

    /// create from basis points (e.g., 325 for 3.25%)
    pub fn from_bps(bps: u32) -> Self {
        Rate(Decimal::from(bps) / Decimal::from(10000))
    }

    /// get as decimal fraction
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// get as percentage
    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// monthly rate from annual rate
    pub fn monthly_rate(&self) -> Rate {
        Rate(self.0 / Decimal::from(12))
    }

    /// (1 + rate)^periods
    pub fn growth_factor(&self, periods: u32) -> crate::errors::Result<Decimal> {
        compound_factor(Decimal::ONE + self.0, periods)
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

/// base^periods by repeated multiplication, overflow is a calculation error
pub fn compound_factor(base: Decimal, periods: u32) -> crate::errors::Result<Decimal> {
    let mut factor = Decimal::ONE;
    for period in 0..periods {
        factor = factor.checked_mul(base).ok_or_else(|| PlannerError::CalculationError {
            message: format!("{base}^{periods} overflows after {period} periods"),
        })?;
    }
    Ok(factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.to_string(), "100.12345679"); // rounded to 8 places
    }

    #[test]
    fn test_rate_from_percent() {
        let rate = Rate::from_percent(dec!(3.2));
        assert_eq!(rate.as_decimal(), dec!(0.032));
        assert_eq!(rate.as_percentage(), dec!(3.2));
        assert_eq!(rate.to_string(), "3.2%");

        assert_eq!(Rate::from_bps(325), Rate::from_percent(dec!(3.25)));
        assert_eq!(Rate::from_percentage(5).as_decimal(), dec!(0.05));
    }

    #[test]
    fn test_apply_rate() {
        let price = Money::from_major(1_800_000);
        let deed_tax = price.apply_rate(Rate::from_decimal(dec!(0.01)));
        assert_eq!(deed_tax, Money::from_major(18_000));
    }

    #[test]
    fn test_growth_factor() {
        let growth = Rate::from_percentage(10);
        assert_eq!(growth.growth_factor(0).unwrap(), Decimal::ONE);
        assert_eq!(growth.growth_factor(2).unwrap(), dec!(1.21));
    }

    #[test]
    fn test_compound_factor_overflow() {
        let result = compound_factor(dec!(1.2), 400);
        assert!(matches!(result, Err(PlannerError::CalculationError { .. })));

        assert!(Rate::from_percentage(100).growth_factor(120).is_err());
        assert!(Rate::from_percentage(100).growth_factor(90).is_ok());
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(Money::from_major(59_000).format_currency("¥"), "¥59,000.00");
        assert_eq!(Money::from_decimal(dec!(8649.3373)).format_currency("¥"), "¥8,649.34");
        assert_eq!(Money::from_decimal(dec!(999.999)).format_currency("$"), "$1,000.00");
        assert_eq!(Money::from_major(-1_234_567).format_currency("¥"), "-¥1,234,567.00");
        assert_eq!(Money::ZERO.format_currency("¥"), "¥0.00");
    }

    #[test]
    fn test_money_sum() {
        let parts = vec![Money::from_major(1), Money::from_major(2), Money::from_major(3)];
        let total: Money = parts.iter().sum();
        assert_eq!(total, Money::from_major(6));
    }
}
