//! Corridor fee adjustments.

use std::collections::HashMap;

use remitroute_common::{Currency, CurrencyPair};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::catalog::Provider;

/// Lowest fee percentage ever charged, whatever the corridor subsidy.
pub const MIN_FEE_PERCENT: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Per-corridor adjustments to a provider's base fee.
///
/// Keys are directional: `USD-EUR` and `EUR-USD` are separate corridors.
/// Corridors without an entry adjust by zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CorridorFees {
    adjustments: HashMap<String, Decimal>,
}

impl CorridorFees {
    /// Create a table with no adjustments.
    pub fn empty() -> Self {
        Self {
            adjustments: HashMap::new(),
        }
    }

    /// Return this table with an adjustment set for `from -> to`.
    pub fn with_adjustment(mut self, from: Currency, to: Currency, adjustment: Decimal) -> Self {
        let key = CurrencyPair::new(from, to).corridor_key();
        self.adjustments.insert(key, adjustment);
        self
    }

    /// Signed adjustment in percentage points for `from -> to`.
    pub fn adjustment(&self, from: &Currency, to: &Currency) -> Decimal {
        let key = CurrencyPair::new(from.clone(), to.clone()).corridor_key();
        self.adjustments.get(&key).copied().unwrap_or(Decimal::ZERO)
    }

    /// Fee percentage `provider` charges on `from -> to`, floored at
    /// [`MIN_FEE_PERCENT`].
    pub fn effective_fee(&self, provider: &Provider, from: &Currency, to: &Currency) -> Decimal {
        (provider.base_fee_percent + self.adjustment(from, to)).max(MIN_FEE_PERCENT)
    }

    /// Number of corridors with an adjustment.
    pub fn len(&self) -> usize {
        self.adjustments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjustments.is_empty()
    }
}

impl Default for CorridorFees {
    fn default() -> Self {
        let entries = [
            ("USD", "EUR", dec!(-0.1)), ("USD", "GBP", dec!(-0.1)), ("USD", "INR", dec!(0.3)), ("USD", "JPY", dec!(0.2)),
            ("EUR", "USD", dec!(-0.1)), ("EUR", "GBP", dec!(-0.05)), ("EUR", "INR", dec!(0.4)), ("EUR", "JPY", dec!(0.3)),
            ("GBP", "USD", dec!(-0.1)), ("GBP", "EUR", dec!(-0.05)), ("GBP", "INR", dec!(0.3)), ("GBP", "JPY", dec!(0.25)),
            ("JPY", "USD", dec!(0.2)), ("JPY", "EUR", dec!(0.25)), ("JPY", "GBP", dec!(0.25)), ("JPY", "INR", dec!(0.5)),
            ("INR", "USD", dec!(0.5)), ("INR", "EUR", dec!(0.6)), ("INR", "GBP", dec!(0.5)), ("INR", "JPY", dec!(0.7)),
        ];

        entries
            .into_iter()
            .fold(Self::empty(), |fees, (from, to, adjustment)| {
                fees.with_adjustment(Currency::new(from), Currency::new(to), adjustment)
            })
    }
}
