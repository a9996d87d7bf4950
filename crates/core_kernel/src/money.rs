//! Money types with precise decimal arithmetic
//!
//! Claim and policy amounts arrive from the backend as plain JSON numbers.
//! They are held as `rust_decimal::Decimal` on the wire types and lifted into
//! `Money` whenever an amount is summed, compared across records, or shown
//! to a user.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency of portal amounts; the backend reports everything in rupees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    LKR,
}

impl Currency {
    /// Returns the number of decimal places for this currency
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Returns the currency symbol
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::LKR => "Rs",
        }
    }

    /// Returns the ISO 4217 code
    pub fn code(&self) -> &'static str {
        match self {
            Currency::LKR => "LKR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary amount with associated currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
}

impl Money {
    /// Creates a new Money value
    pub fn new(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.round_dp(4),
            currency,
        }
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the currency
    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dp = self.currency.decimal_places();
        write!(
            f,
            "{} {:.dp$}",
            self.currency.symbol(),
            self.amount,
            dp = dp as usize
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_creation() {
        let m = Money::new(dec!(100.50), Currency::LKR);
        assert_eq!(m.amount(), dec!(100.50));
        assert_eq!(m.currency(), Currency::LKR);
    }

    #[test]
    fn test_default_currency_is_rupees() {
        assert_eq!(Currency::default(), Currency::LKR);
    }

    #[test]
    fn test_currency_wire_code() {
        assert_eq!(serde_json::to_string(&Currency::LKR).unwrap(), "\"LKR\"");
        assert_eq!(Currency::LKR.to_string(), "LKR");
    }

    #[test]
    fn test_rounds_to_four_places() {
        let m = Money::new(dec!(10.123456), Currency::LKR);
        assert_eq!(m.amount(), dec!(10.1235));
    }

    #[test]
    fn test_display() {
        let m = Money::new(dec!(1000), Currency::LKR);
        assert_eq!(m.to_string(), "Rs 1000.00");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn display_always_has_two_decimals(cents in 0i64..1_000_000_000i64) {
            let shown = Money::new(Decimal::new(cents, 2), Currency::LKR).to_string();
            let (_, fraction) = shown.rsplit_once('.').unwrap();
            prop_assert!(shown.starts_with("Rs "));
            prop_assert_eq!(fraction.len(), 2);
        }
    }
}
