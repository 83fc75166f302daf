//! Transfer provider catalog.

use std::collections::HashSet;

use remitroute_common::RemitRouteError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Providers allowed on either leg of a two-hop route.
///
/// Fixed rather than derived from the catalog: it bounds a two-hop search to
/// nine provider pairs per intermediary currency.
pub const MULTI_HOP_ELIGIBLE_PROVIDERS: [&str; 3] = ["Wise", "OFX", "XE"];

/// A named money transfer provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    /// Unique provider name.
    pub name: String,
    /// Fee charged before corridor adjustment, in percent of the amount.
    pub base_fee_percent: Decimal,
    /// Nominal delivery time, e.g. `1-2 days`.
    pub speed_label: String,
    /// Reliability score, 0-100.
    pub reliability_score: u8,
}

impl Provider {
    /// Create a provider.
    pub fn new(
        name: impl Into<String>,
        base_fee_percent: Decimal,
        speed_label: impl Into<String>,
        reliability_score: u8,
    ) -> Self {
        Self {
            name: name.into(),
            base_fee_percent,
            speed_label: speed_label.into(),
            reliability_score,
        }
    }
}

/// Ordered registry of providers. Order determines route generation order.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderCatalog {
    providers: Vec<Provider>,
}

impl ProviderCatalog {
    /// Build a catalog, rejecting duplicate names, negative fees and
    /// reliability scores above 100.
    pub fn new(providers: Vec<Provider>) -> Result<Self, RemitRouteError> {
        let mut seen = HashSet::new();
        for provider in &providers {
            if !seen.insert(provider.name.as_str()) {
                return Err(RemitRouteError::ConfigurationError(format!(
                    "duplicate provider {}",
                    provider.name
                )));
            }
            if provider.base_fee_percent.is_sign_negative() && !provider.base_fee_percent.is_zero() {
                return Err(RemitRouteError::ConfigurationError(format!(
                    "provider {} has negative base fee",
                    provider.name
                )));
            }
            if provider.reliability_score > 100 {
                return Err(RemitRouteError::ConfigurationError(format!(
                    "provider {} reliability {} exceeds 100",
                    provider.name, provider.reliability_score
                )));
            }
        }

        Ok(Self { providers })
    }

    /// Look up a provider by name.
    pub fn get(&self, name: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.name == name)
    }

    /// Providers in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Provider> {
        self.providers.iter()
    }

    /// Number of providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Providers usable on a two-hop leg, in [`MULTI_HOP_ELIGIBLE_PROVIDERS`]
    /// order. Names missing from this catalog are skipped.
    pub fn multi_hop_eligible(&self) -> Vec<&Provider> {
        MULTI_HOP_ELIGIBLE_PROVIDERS
            .iter()
            .filter_map(|name| self.get(name))
            .collect()
    }
}

impl Default for ProviderCatalog {
    fn default() -> Self {
        Self {
            providers: vec![
                Provider::new("Wise", dec!(0.5), "1-2 days", 98),
                Provider::new("SWIFT", dec!(2.0), "3-5 days", 95),
                Provider::new("Remitly", dec!(0.8), "1-3 days", 94),
                Provider::new("Western Union", dec!(1.5), "Same day", 92),
                Provider::new("OFX", dec!(0.4), "1-2 days", 96),
                Provider::new("XE", dec!(0.6), "1-3 days", 97),
                Provider::new("Crypto Bridge", dec!(0.3), "10 mins", 88),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog() {
        let catalog = ProviderCatalog::default();
        assert_eq!(catalog.len(), 7);

        let ofx = catalog.get("OFX").unwrap();
        assert_eq!(ofx.base_fee_percent, dec!(0.4));
        assert_eq!(ofx.reliability_score, 96);

        let names: Vec<_> = catalog.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names[0], "Wise");
        assert_eq!(names[6], "Crypto Bridge");

        // The default catalog passes its own validation.
        assert!(ProviderCatalog::new(catalog.iter().cloned().collect()).is_ok());
    }

    #[test]
    fn test_multi_hop_eligible() {
        let catalog = ProviderCatalog::default();
        let eligible: Vec<_> = catalog
            .multi_hop_eligible()
            .into_iter()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(eligible, vec!["Wise", "OFX", "XE"]);

        let small = ProviderCatalog::new(vec![Provider::new("XE", dec!(0.6), "1-3 days", 97)]).unwrap();
        assert_eq!(small.multi_hop_eligible().len(), 1);
    }

    #[test]
    fn test_catalog_validation() {
        let dup = ProviderCatalog::new(vec![
            Provider::new("Wise", dec!(0.5), "1-2 days", 98),
            Provider::new("Wise", dec!(0.7), "1-2 days", 98),
        ]);
        assert!(dup.is_err());

        let negative = ProviderCatalog::new(vec![Provider::new("Cheap", dec!(-0.5), "now", 50)]);
        assert!(negative.is_err());

        let too_reliable = ProviderCatalog::new(vec![Provider::new("Perfect", dec!(1), "now", 101)]);
        assert!(too_reliable.is_err());
    }
}
