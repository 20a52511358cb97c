//! Type-safe price representation using decimal arithmetic.
//!
//! All prices are Brazilian reais. Catalog markup carries them as localized
//! text (`R$ 1.234,56`), so this module also owns the codec between that
//! text and [`Decimal`]:
//!
//! - [`parse_amount`] never fails; anything that is not a non-negative
//!   number is zero.
//! - [`format_amount`] renders exactly what [`parse_amount`] accepts, so a
//!   catalog price survives a round trip to two decimal places.

use std::fmt;
use std::ops::{Add, Mul};
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Currency symbol prefix used by the pt-BR locale.
const CURRENCY_SYMBOL: &str = "R$";

/// Parse localized currency text into an amount.
///
/// Strips the `R$` symbol and all whitespace (including non-breaking
/// spaces), drops `.` thousands separators and turns the first `,` into the
/// decimal point. Only plain decimal text is accepted: exponent forms such
/// as `1e3` are malformed. Malformed input and negative amounts yield zero.
#[must_use]
pub fn parse_amount(text: &str) -> Decimal {
    let cleaned: String = text
        .replace(CURRENCY_SYMBOL, "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .collect();

    Decimal::from_str(&cleaned.replacen(',', ".", 1))
        .unwrap_or(Decimal::ZERO)
        .max(Decimal::ZERO)
}

/// Format an amount as pt-BR currency text (e.g. `R$ 1.234,56`).
///
/// Always renders two decimal places, rounding half away from zero.
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded.set_sign_positive(true);
    rounded.rescale(2);

    let digits = rounded.to_string();
    let (units, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!(
        "{}{CURRENCY_SYMBOL} {},{cents}",
        if negative { "-" } else { "" },
        group_thousands(units)
    )
}

/// Insert `.` between every group of three integer digits.
fn group_thousands(units: &str) -> String {
    let len = units.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in units.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

/// A non-negative unit or line price in reais.
///
/// Serialized as a plain JSON number to match the cart API wire format.
/// Addition and quantity multiplication saturate at [`Decimal::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero reais.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in centavos.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Parse localized price text, see [`parse_amount`].
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self(parse_amount(text))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether this price is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_amount(self.0))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.checked_add(rhs.0).unwrap_or(Decimal::MAX))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_localized() {
        assert_eq!(parse_amount("R$ 20,00"), Decimal::new(2000, 2));
        assert_eq!(parse_amount("R$ 1.234,56"), Decimal::new(123_456, 2));
        assert_eq!(parse_amount("  R$\u{a0}31,90 "), Decimal::new(3190, 2));
        assert_eq!(parse_amount("5,5"), Decimal::new(55, 1));
    }

    #[test]
    fn test_parse_amount_fails_soft() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("R$"), Decimal::ZERO);
        assert_eq!(parse_amount("sob consulta"), Decimal::ZERO);
        assert_eq!(parse_amount("R$ 1,2,3"), Decimal::ZERO);
        assert_eq!(parse_amount("1e3"), Decimal::ZERO);
    }

    #[test]
    fn test_parse_amount_clamps_negative() {
        assert_eq!(parse_amount("-R$ 5,00"), Decimal::ZERO);
        assert_eq!(parse_amount("R$ -0,01"), Decimal::ZERO);
        assert!(Price::parse("-R$ 5,00").is_zero());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::new(4550, 2)), "R$ 45,50");
        assert_eq!(format_amount(Decimal::ZERO), "R$ 0,00");
        assert_eq!(format_amount(Decimal::new(5, 0)), "R$ 5,00");
        assert_eq!(format_amount(Decimal::new(123_456_789, 2)), "R$ 1.234.567,89");
        assert_eq!(format_amount(Decimal::new(100_000, 2)), "R$ 1.000,00");
        assert_eq!(format_amount(Decimal::new(-500, 2)), "-R$ 5,00");
    }

    #[test]
    fn test_format_amount_rounds_half_away_from_zero() {
        assert_eq!(format_amount(Decimal::new(10_005, 3)), "R$ 10,01");
        assert_eq!(format_amount(Decimal::new(10_004, 3)), "R$ 10,00");
    }

    #[test]
    fn test_round_trip_within_a_centavo() {
        for cents in (0..2_000_000_i64).step_by(997) {
            let amount = Decimal::new(cents, 2);
            assert_eq!(parse_amount(&format_amount(amount)), amount, "{cents}");
        }

        let fractional = Decimal::new(123_456_789, 5);
        let back = parse_amount(&format_amount(fractional));
        assert!((back - fractional).abs() <= Decimal::new(5, 3));
    }

    #[test]
    fn test_price_from_cents_and_arithmetic() {
        let price = Price::from_cents(2000);
        assert_eq!(price.amount(), Decimal::new(2000, 2));
        assert_eq!((price * 2).to_string(), "R$ 40,00");
        assert_eq!(
            [Price::from_cents(4000), Price::from_cents(550)]
                .into_iter()
                .sum::<Price>()
                .to_string(),
            "R$ 45,50"
        );
    }

    #[test]
    fn test_price_arithmetic_saturates() {
        let max = Price::parse("R$ 79.228.162.514.264.337.593.543.950.335");
        assert_eq!(max.amount(), Decimal::MAX);
        assert_eq!((max * 2).amount(), Decimal::MAX);
        assert_eq!((max + Price::from_cents(1)).amount(), Decimal::MAX);
        assert_eq!([max, max].into_iter().sum::<Price>().amount(), Decimal::MAX);
        assert!(max.to_string().starts_with("R$ 79.228."));
    }

    #[test]
    fn test_price_serializes_as_number() {
        let json = serde_json::to_string(&Price::from_cents(3190)).unwrap();
        assert_eq!(json, "31.9");

        let back: Price = serde_json::from_str("31.9").unwrap();
        assert_eq!(back, Price::from_cents(3190));

        let whole: Price = serde_json::from_str("40").unwrap();
        assert_eq!(whole, Price::from_cents(4000));
    }
}
