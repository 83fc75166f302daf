//! Cross-rate table.

use std::collections::BTreeMap;

use remitroute_common::Currency;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::source::RateSnapshot;

/// Multiplicative conversion factors between currency pairs.
///
/// A table is built once (seeded or rebuilt from a snapshot) and then only
/// read; refreshing produces a new table instead of editing this one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RateTable {
    rates: BTreeMap<Currency, BTreeMap<Currency, Decimal>>,
}

impl RateTable {
    /// Create a table with no rates. Every lookup fails open to `1`.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create the hand-curated seed table used until a snapshot arrives.
    ///
    /// The seed rows were curated independently, so `rate[A][B] * rate[B][A]`
    /// is only approximately `1`.
    pub fn seeded() -> Self {
        let mut table = Self::empty();
        for (from, row) in seed_rows() {
            for (to, rate) in row {
                table = table.with_rate(Currency::new(from), Currency::new(to), rate);
            }
        }
        table
    }

    /// Return a copy of this table with one rate set. Used while building.
    pub fn with_rate(mut self, from: Currency, to: Currency, rate: Decimal) -> Self {
        self.rates.entry(from).or_default().insert(to, rate);
        self
    }

    /// Stored rate for a pair, if any.
    pub fn lookup(&self, from: &Currency, to: &Currency) -> Option<Decimal> {
        self.rates.get(from).and_then(|row| row.get(to)).copied()
    }

    /// Rate for a pair. Identical currencies and unknown pairs yield `1`.
    pub fn rate(&self, from: &Currency, to: &Currency) -> Decimal {
        if from == to {
            return Decimal::ONE;
        }
        match self.lookup(from, to) {
            Some(rate) => rate,
            None => {
                debug!(from = %from, to = %to, "No rate for pair, using identity");
                Decimal::ONE
            }
        }
    }

    /// Convert an amount between currencies.
    ///
    /// Saturates at the `Decimal` bounds instead of overflowing.
    pub fn convert(&self, amount: Decimal, from: &Currency, to: &Currency) -> Decimal {
        amount.saturating_mul(self.rate(from, to))
    }

    /// Currencies with a row in this table.
    pub fn currencies(&self) -> impl Iterator<Item = &Currency> {
        self.rates.keys()
    }

    /// All rates quoted from `from`.
    pub fn row(&self, from: &Currency) -> Option<&BTreeMap<Currency, Decimal>> {
        self.rates.get(from)
    }

    /// Number of currencies with a row.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// Build a fresh table over this table's currencies from a USD-quoted
    /// snapshot.
    ///
    /// Returns `None` when the snapshot has no `USD` entry, or when a cross
    /// rate does not fit in a `Decimal`. Every cross rate is derived from the
    /// single USD anchor, so the result is triangularly consistent. A currency
    /// missing from the snapshot (or quoted at zero or below) is treated as
    /// quoted at `1`.
    pub fn rebuilt_from_usd_snapshot(&self, snapshot: &RateSnapshot) -> Option<RateTable> {
        snapshot.rate_for(&Currency::usd())?;

        let usd_quote = |currency: &Currency| {
            snapshot
                .rate_for(currency)
                .filter(|r| r.is_sign_positive() && !r.is_zero())
                .unwrap_or(Decimal::ONE)
        };

        let mut rates = BTreeMap::new();
        for from in self.rates.keys() {
            let from_to_usd = Decimal::ONE.checked_div(usd_quote(from))?;
            let mut row = BTreeMap::new();
            for to in self.rates.keys() {
                let rate = if from == to {
                    Decimal::ONE
                } else {
                    from_to_usd.checked_mul(usd_quote(to))?
                };
                row.insert(to.clone(), rate);
            }
            rates.insert(from.clone(), row);
        }

        Some(RateTable { rates })
    }
}

fn seed_rows() -> Vec<(&'static str, Vec<(&'static str, Decimal)>)> {
    vec![
        ("USD", vec![
            ("EUR", dec!(0.92)), ("GBP", dec!(0.79)), ("JPY", dec!(149.50)), ("INR", dec!(83.12)),
            ("AUD", dec!(1.53)), ("CAD", dec!(1.36)), ("CHF", dec!(0.88)), ("CNY", dec!(7.24)),
            ("SGD", dec!(1.34)), ("AED", dec!(3.67)), ("USD", dec!(1)),
        ]),
        ("EUR", vec![
            ("USD", dec!(1.09)), ("GBP", dec!(0.86)), ("JPY", dec!(162.45)), ("INR", dec!(90.35)),
            ("AUD", dec!(1.66)), ("CAD", dec!(1.48)), ("CHF", dec!(0.96)), ("CNY", dec!(7.87)),
            ("SGD", dec!(1.46)), ("AED", dec!(3.99)), ("EUR", dec!(1)),
        ]),
        ("GBP", vec![
            ("USD", dec!(1.27)), ("EUR", dec!(1.16)), ("JPY", dec!(189.23)), ("INR", dec!(105.18)),
            ("AUD", dec!(1.93)), ("CAD", dec!(1.72)), ("CHF", dec!(1.11)), ("CNY", dec!(9.16)),
            ("SGD", dec!(1.70)), ("AED", dec!(4.64)), ("GBP", dec!(1)),
        ]),
        ("JPY", vec![
            ("USD", dec!(0.0067)), ("EUR", dec!(0.0062)), ("GBP", dec!(0.0053)), ("INR", dec!(0.556)),
            ("AUD", dec!(0.010)), ("CAD", dec!(0.0091)), ("CHF", dec!(0.0059)), ("CNY", dec!(0.048)),
            ("SGD", dec!(0.009)), ("AED", dec!(0.025)), ("JPY", dec!(1)),
        ]),
        ("INR", vec![
            ("USD", dec!(0.012)), ("EUR", dec!(0.011)), ("GBP", dec!(0.0095)), ("JPY", dec!(1.80)),
            ("AUD", dec!(0.018)), ("CAD", dec!(0.016)), ("CHF", dec!(0.011)), ("CNY", dec!(0.087)),
            ("SGD", dec!(0.016)), ("AED", dec!(0.044)), ("INR", dec!(1)),
        ]),
        ("AUD", vec![
            ("USD", dec!(0.65)), ("EUR", dec!(0.60)), ("GBP", dec!(0.52)), ("JPY", dec!(97.71)),
            ("INR", dec!(54.32)), ("CAD", dec!(0.89)), ("CHF", dec!(0.58)), ("CNY", dec!(4.73)),
            ("SGD", dec!(0.88)), ("AED", dec!(2.40)), ("AUD", dec!(1)),
        ]),
        ("CAD", vec![
            ("USD", dec!(0.74)), ("EUR", dec!(0.68)), ("GBP", dec!(0.58)), ("JPY", dec!(109.93)),
            ("INR", dec!(61.12)), ("AUD", dec!(1.13)), ("CHF", dec!(0.65)), ("CNY", dec!(5.32)),
            ("SGD", dec!(0.99)), ("AED", dec!(2.70)), ("CAD", dec!(1)),
        ]),
        ("CHF", vec![
            ("USD", dec!(1.14)), ("EUR", dec!(1.04)), ("GBP", dec!(0.90)), ("JPY", dec!(169.89)),
            ("INR", dec!(94.45)), ("AUD", dec!(1.74)), ("CAD", dec!(1.55)), ("CNY", dec!(8.23)),
            ("SGD", dec!(1.53)), ("AED", dec!(4.17)), ("CHF", dec!(1)),
        ]),
        ("CNY", vec![
            ("USD", dec!(0.14)), ("EUR", dec!(0.13)), ("GBP", dec!(0.11)), ("JPY", dec!(20.65)),
            ("INR", dec!(11.48)), ("AUD", dec!(0.21)), ("CAD", dec!(0.19)), ("CHF", dec!(0.12)),
            ("SGD", dec!(0.19)), ("AED", dec!(0.51)), ("CNY", dec!(1)),
        ]),
        ("SGD", vec![
            ("USD", dec!(0.75)), ("EUR", dec!(0.69)), ("GBP", dec!(0.59)), ("JPY", dec!(111.94)),
            ("INR", dec!(62.24)), ("AUD", dec!(1.14)), ("CAD", dec!(1.02)), ("CHF", dec!(0.66)),
            ("CNY", dec!(5.43)), ("AED", dec!(2.75)), ("SGD", dec!(1)),
        ]),
        ("AED", vec![
            ("USD", dec!(0.27)), ("EUR", dec!(0.25)), ("GBP", dec!(0.22)), ("JPY", dec!(40.74)),
            ("INR", dec!(22.65)), ("AUD", dec!(0.42)), ("CAD", dec!(0.37)), ("CHF", dec!(0.24)),
            ("CNY", dec!(1.97)), ("SGD", dec!(0.36)), ("AED", dec!(1)),
        ]),
    ]
}
