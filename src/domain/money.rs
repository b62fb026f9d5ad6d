use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

pub const CURRENCY_SYMBOL: &str = "฿";

/// A THB amount.
///
/// Wraps `rust_decimal::Decimal` so prices and totals stay exact; rounding
/// to two decimals only happens when the value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Two-decimal rendering without the currency symbol, as used in CSV output.
    pub fn to_plain_string(&self) -> String {
        format!("{:.2}", self.0.round_dp(2))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CURRENCY_SYMBOL, self.to_plain_string())
    }
}

impl Add for Money {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Mul<Decimal> for Money {
    type Output = Self;
    fn mul(self, rhs: Decimal) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    #[serde(rename = "THB")]
    Thb,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Thb => write!(f, "THB"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_arithmetic() {
        let a = Money::new(dec!(100));
        let b = Money::new(dec!(50));
        assert_eq!(a + b, Money::new(dec!(150)));
        assert_eq!(a * dec!(0.07), Money::new(dec!(7)));
    }

    #[test]
    fn test_money_sum() {
        let prices = [Money::new(dec!(35)), Money::new(dec!(700))];
        assert_eq!(prices.iter().sum::<Money>(), Money::new(dec!(735)));
        assert_eq!(Vec::<Money>::new().into_iter().sum::<Money>(), Money::ZERO);
    }

    #[test]
    fn test_money_display_rounds_to_two_places() {
        assert_eq!(Money::new(dec!(107)).to_string(), "฿107.00");
        assert_eq!(Money::new(dec!(10.5)).to_string(), "฿10.50");
        assert_eq!(Money::new(dec!(2.456)).to_plain_string(), "2.46");
    }
}
