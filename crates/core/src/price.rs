//! Monetary amounts.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_object::ValueObject;

/// Non-negative price held in the smallest currency unit (cents).
///
/// Parsed from and rendered as a plain decimal with at most two fractional
/// digits (`"2.5"` and `"2.50"` are the same price).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn from_cents(cents: u64) -> Self {
        Self(cents)
    }

    pub fn cents(self) -> u64 {
        self.0
    }

    /// Unit price times a quantity; `None` on overflow.
    pub fn times(self, quantity: u32) -> Option<Price> {
        self.0.checked_mul(u64::from(quantity)).map(Price)
    }

    pub fn checked_add(self, other: Price) -> Option<Price> {
        self.0.checked_add(other.0).map(Price)
    }
}

impl ValueObject for Price {}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl FromStr for Price {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || DomainError::input_format(format!("invalid price '{raw}'"));

        let (whole, frac) = match raw.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some((w, f)) => (w, f),
            None => (raw, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        if frac.len() > 2 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let whole: u64 = whole.parse().map_err(|_| invalid())?;
        let frac_cents: u64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<u64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|c| c.checked_add(frac_cents))
            .map(Price)
            .ok_or_else(invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_fractional_prices() {
        assert_eq!("3".parse::<Price>().unwrap(), Price::from_cents(300));
        assert_eq!("2.5".parse::<Price>().unwrap(), Price::from_cents(250));
        assert_eq!("2.50".parse::<Price>().unwrap(), Price::from_cents(250));
        assert_eq!(" 0.07 ".parse::<Price>().unwrap(), Price::from_cents(7));
    }

    #[test]
    fn rejects_negative_and_malformed_prices() {
        for bad in ["-1.00", "abc", "", "1.234", "1.", ".5", "1,50", "$2.00"] {
            let err = bad.parse::<Price>().unwrap_err();
            assert!(matches!(err, DomainError::InputFormat(_)), "{bad} should fail");
        }
    }

    #[test]
    fn displays_with_two_decimals() {
        assert_eq!(Price::from_cents(250).to_string(), "2.50");
        assert_eq!(Price::from_cents(5).to_string(), "0.05");
        assert_eq!(Price::from_cents(1200).to_string(), "12.00");
    }

    #[test]
    fn times_detects_overflow() {
        assert_eq!(Price::from_cents(260).times(3), Some(Price::from_cents(780)));
        assert_eq!(Price::from_cents(u64::MAX).times(2), None);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: rendering then parsing yields the same price.
            #[test]
            fn display_parses_back(cents in 0u64..10_000_000_000) {
                let price = Price::from_cents(cents);
                prop_assert_eq!(price.to_string().parse::<Price>().unwrap(), price);
            }
        }
    }
}
