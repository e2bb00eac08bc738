//! Type-safe price representation using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Catalog amounts are whole currency units, so whole prices render without
/// a fractional part (`$99`) and anything else renders with two places
/// (`$12.50`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Multiply the price by a line quantity, saturating at the largest
    /// representable amount.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self {
            amount: self.amount.saturating_mul(Decimal::from(quantity)),
            currency_code: self.currency_code,
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.currency_code.symbol();
        if self.amount.fract().is_zero() {
            write!(f, "{symbol}{}", self.amount.trunc())
        } else {
            write!(f, "{symbol}{:.2}", self.amount)
        }
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_whole_amount() {
        let price = Price::new(Decimal::from(189), CurrencyCode::USD);
        assert_eq!(price.to_string(), "$189");
    }

    #[test]
    fn test_display_fractional_amount() {
        let price = Price::new(Decimal::new(1250, 2), CurrencyCode::GBP);
        assert_eq!(price.to_string(), "£12.50");
    }

    #[test]
    fn test_display_whole_amount_with_scale() {
        // 85.00 carries scale 2 but is still a whole amount
        let price = Price::new(Decimal::new(8500, 2), CurrencyCode::USD);
        assert_eq!(price.to_string(), "$85");
    }

    #[test]
    fn test_times() {
        let price = Price::new(Decimal::from(99), CurrencyCode::USD).times(3);
        assert_eq!(price.amount, Decimal::from(297));
        assert_eq!(price.currency_code, CurrencyCode::USD);
    }

    #[test]
    fn test_times_saturates_on_overflow() {
        let price = Price::new(Decimal::from(100_000_000_000_000_000_000_u128), CurrencyCode::USD)
            .times(u32::MAX);
        assert_eq!(price.amount, Decimal::MAX);
    }
}
