//! Monetary types for RemitRoute.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Every currency code RemitRoute quotes transfers for.
pub const SUPPORTED_CURRENCY_CODES: [&str; 11] = [
    "USD", "EUR", "GBP", "JPY", "INR", "AUD", "CAD", "CHF", "CNY", "SGD", "AED",
];

/// Currencies a two-hop route may pass through.
///
/// Deliberately smaller than [`SUPPORTED_CURRENCY_CODES`]; the two lists are
/// not interchangeable.
pub const MULTI_HOP_INTERMEDIARY_CODES: [&str; 5] = ["USD", "EUR", "GBP", "JPY", "INR"];

/// ISO 4217 currency code.
///
/// Codes are upper-cased but never checked against the supported set, so
/// unknown codes flow through the engine and hit the identity rate.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Currency(String);

impl Currency {
    /// Create a new currency from code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    /// Get the currency code.
    pub fn code(&self) -> &str {
        &self.0
    }

    /// Whether this code is one of [`SUPPORTED_CURRENCY_CODES`].
    pub fn is_supported(&self) -> bool {
        SUPPORTED_CURRENCY_CODES.contains(&self.0.as_str())
    }

    /// Get the standard decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self.0.as_str() {
            "JPY" | "KRW" | "VND" => 0,
            "BHD" | "KWD" | "OMR" => 3,
            _ => 2,
        }
    }

    /// Display symbol, falling back to the code itself.
    pub fn symbol(&self) -> &str {
        match self.0.as_str() {
            "USD" => "$",
            "EUR" => "€",
            "GBP" => "£",
            "JPY" | "CNY" => "¥",
            "INR" => "₹",
            "AUD" => "A$",
            "CAD" => "C$",
            "CHF" => "CHF ",
            "SGD" => "S$",
            "AED" => "د.إ",
            other => other,
        }
    }

    /// All supported currencies, in canonical order.
    pub fn supported() -> Vec<Currency> {
        SUPPORTED_CURRENCY_CODES.iter().map(|c| Currency::new(*c)).collect()
    }

    /// Candidate intermediary currencies for two-hop routes.
    pub fn multi_hop_intermediaries() -> Vec<Currency> {
        MULTI_HOP_INTERMEDIARY_CODES
            .iter()
            .map(|c| Currency::new(*c))
            .collect()
    }

    /// Common currencies
    pub fn usd() -> Self {
        Self::new("USD")
    }

    pub fn eur() -> Self {
        Self::new("EUR")
    }

    pub fn gbp() -> Self {
        Self::new("GBP")
    }

    pub fn jpy() -> Self {
        Self::new("JPY")
    }

    pub fn inr() -> Self {
        Self::new("INR")
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Currency {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl std::str::FromStr for Currency {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// A directional currency pair (a transfer corridor).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Source currency.
    pub base: Currency,
    /// Destination currency.
    pub quote: Currency,
}

impl CurrencyPair {
    /// Create a new currency pair.
    pub fn new(base: Currency, quote: Currency) -> Self {
        Self { base, quote }
    }

    /// Key used by corridor fee tables, e.g. `USD-EUR`.
    pub fn corridor_key(&self) -> String {
        format!("{}-{}", self.base, self.quote)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// A monetary amount with currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// The amount value (high precision decimal).
    pub value: Decimal,
    /// ISO 4217 currency code.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money instance.
    pub fn new(value: Decimal, currency: Currency) -> Self {
        Self { value, currency }
    }

    /// Round to the currency's standard decimal places.
    pub fn round(&self) -> Self {
        let places = self.currency.decimal_places();
        Self {
            value: self.value.round_dp(places),
            currency: self.currency.clone(),
        }
    }

    /// Symbol-prefixed rendering with two fraction digits and thousands
    /// separators, e.g. `€1,234.50`.
    pub fn display_with_symbol(&self) -> String {
        let rounded = self.value.round_dp(2);
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let text = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, ch) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        format!(
            "{}{}{}.{}",
            if negative { "-" } else { "" },
            self.currency.symbol(),
            grouped,
            frac_part
        )
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.currency)
    }
}
