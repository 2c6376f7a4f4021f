//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. The storefront sells
//! in a single currency, so no currency code is carried; amounts are never
//! negative.
//!
//! On the wire (cart snapshots, API payloads) amounts are decimal numbers in
//! major units, e.g. `49.99`. Amounts are capped at [`Money::MAX`] so every
//! value survives that encoding exactly.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::str::FromStr;

const CENTS_PER_UNIT: u64 = 100;

/// A non-negative monetary amount in minor units (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    amount_cents: u64,
}

impl Money {
    /// Largest representable amount: ten trillion in major units.
    ///
    /// Well below 2^51 cents, so a decimal `f64` rendering converts back to
    /// the same cent count.
    pub const MAX: Money = Money {
        amount_cents: 1_000_000_000_000_000,
    };

    /// Create a Money value from cents, saturating at [`Money::MAX`].
    pub const fn from_cents(amount_cents: u64) -> Self {
        if amount_cents > Self::MAX.amount_cents {
            Self::MAX
        } else {
            Self { amount_cents }
        }
    }

    /// Create a zero amount.
    pub const fn zero() -> Self {
        Self::from_cents(0)
    }

    /// Create a Money value from a decimal amount in major units.
    ///
    /// Returns `None` for negative, NaN or inputs above [`Money::MAX`].
    ///
    /// ```
    /// use shop_cart::money::Money;
    /// let price = Money::from_decimal(49.99).unwrap();
    /// assert_eq!(price.cents(), 4999);
    /// assert!(Money::from_decimal(-1.0).is_none());
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount < 0.0 {
            return None;
        }
        let cents = (amount * CENTS_PER_UNIT as f64).round();
        if cents > Self::MAX.amount_cents as f64 {
            return None;
        }
        Some(Self::from_cents(cents as u64))
    }

    /// Amount in cents.
    pub fn cents(&self) -> u64 {
        self.amount_cents
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Convert to a decimal value in major units.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / CENTS_PER_UNIT as f64
    }

    /// Format without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        format!(
            "{}.{:02}",
            self.amount_cents / CENTS_PER_UNIT,
            self.amount_cents % CENTS_PER_UNIT
        )
    }

    /// Format with a currency symbol prefix (e.g., "$49.99").
    pub fn display_with(&self, symbol: &str) -> String {
        format!("{}{}", symbol, self.display_amount())
    }

    /// Add another amount, saturating at [`Money::MAX`].
    pub fn saturating_add(self, other: Money) -> Money {
        Money::from_cents(self.amount_cents.saturating_add(other.amount_cents))
    }

    /// Multiply by a quantity, saturating at [`Money::MAX`].
    pub fn saturating_mul(self, factor: u64) -> Money {
        Money::from_cents(self.amount_cents.saturating_mul(factor))
    }

    /// Scale by a rate expressed in basis points (1/100 of a percent),
    /// rounding half up to the nearest cent.
    pub fn scale_basis_points(self, basis_points: u32) -> Money {
        let scaled = (self.amount_cents as u128 * basis_points as u128 + 5_000) / 10_000;
        Money::from_cents(u64::try_from(scaled).unwrap_or(u64::MAX))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Money::saturating_add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_amount())
    }
}

/// Error returned when parsing a decimal amount string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid amount '{0}': expected a non-negative number with at most two decimals")]
pub struct ParseMoneyError(String);

impl FromStr for Money {
    type Err = ParseMoneyError;

    /// Parse "49", "49.9" or "49.99" exactly, without going through floats.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMoneyError(s.to_string());
        let trimmed = s.trim();
        let (whole, frac) = match trimmed.split_once('.') {
            Some((w, f)) => (w, f),
            None => (trimmed, ""),
        };
        if whole.is_empty() && frac.is_empty() {
            return Err(err());
        }
        if !whole.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
            || frac.len() > 2
        {
            return Err(err());
        }

        let units: u64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| err())?
        };
        let cents: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| err())? * 10,
            _ => frac.parse().map_err(|_| err())?,
        };

        units
            .checked_mul(CENTS_PER_UNIT)
            .and_then(|c| c.checked_add(cents))
            .filter(|c| *c <= Money::MAX.amount_cents)
            .map(Money::from_cents)
            .ok_or_else(err)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.amount_cents % CENTS_PER_UNIT == 0 {
            serializer.serialize_u64(self.amount_cents / CENTS_PER_UNIT)
        } else {
            serializer.serialize_f64(self.to_decimal())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount).ok_or_else(|| {
            de::Error::invalid_value(
                de::Unexpected::Float(amount),
                &"a non-negative monetary amount",
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        assert_eq!(Money::from_decimal(49.99).unwrap().cents(), 4999);
        assert_eq!(Money::from_decimal(0.1 + 0.2).unwrap().cents(), 30);
        assert!(Money::from_decimal(f64::NAN).is_none());
        assert!(Money::from_decimal(-0.01).is_none());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(4999).display_amount(), "49.99");
        assert_eq!(Money::from_cents(5).display_amount(), "0.05");
        assert_eq!(Money::from_cents(15000).display_with("$"), "$150.00");
        assert_eq!(Money::from_cents(100).to_string(), "1.00");
    }

    #[test]
    fn test_money_parse() {
        assert_eq!("49.99".parse::<Money>().unwrap().cents(), 4999);
        assert_eq!("50".parse::<Money>().unwrap().cents(), 5000);
        assert_eq!("0.5".parse::<Money>().unwrap().cents(), 50);
        assert_eq!(".25".parse::<Money>().unwrap().cents(), 25);
        assert!("".parse::<Money>().is_err());
        assert!("-1".parse::<Money>().is_err());
        assert!("1.234".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
    }

    #[test]
    fn test_money_sum_and_multiply() {
        let total: Money = vec![Money::from_cents(5000), Money::from_cents(2500)]
            .into_iter()
            .sum();
        assert_eq!(total.cents(), 7500);
        assert_eq!(Money::from_cents(5000).saturating_mul(3).cents(), 15000);
        assert_eq!(Money::MAX.saturating_mul(2), Money::MAX);
        assert_eq!(Money::MAX.saturating_add(Money::from_cents(1)), Money::MAX);
    }

    #[test]
    fn test_money_basis_points() {
        // 10% of $150.00
        assert_eq!(Money::from_cents(15000).scale_basis_points(1000).cents(), 1500);
        // 10% of $0.05 rounds half up to 1 cent
        assert_eq!(Money::from_cents(5).scale_basis_points(1000).cents(), 1);
        assert_eq!(Money::from_cents(15000).scale_basis_points(0).cents(), 0);
    }

    #[test]
    fn test_money_serde() {
        assert_eq!(serde_json::to_string(&Money::from_cents(5000)).unwrap(), "50");
        assert_eq!(serde_json::to_string(&Money::from_cents(4999)).unwrap(), "49.99");

        let m: Money = serde_json::from_str("49.99").unwrap();
        assert_eq!(m.cents(), 4999);
        let m: Money = serde_json::from_str("50").unwrap();
        assert_eq!(m.cents(), 5000);
        assert!(serde_json::from_str::<Money>("-5").is_err());
        assert!(serde_json::from_str::<Money>("\"5\"").is_err());
    }

    #[test]
    fn test_money_is_capped() {
        assert_eq!(Money::from_cents(9_007_199_254_740_993), Money::MAX);
        assert!("10000000000000.01".parse::<Money>().is_err());
        assert_eq!("10000000000000".parse::<Money>().unwrap(), Money::MAX);
        assert!(Money::from_decimal(1e14).is_none());
    }

    #[test]
    fn test_large_amounts_survive_serde() {
        for cents in [Money::MAX.cents(), Money::MAX.cents() - 1, 999_999_999_999_999, 123_456_789_012_345] {
            let money = Money::from_cents(cents);
            let json = serde_json::to_string(&money).unwrap();
            let back: Money = serde_json::from_str(&json).unwrap();
            assert_eq!(back, money, "{json}");
        }
    }
}
