//! Candidate route generation.

use remitroute_common::Currency;
use remitroute_fx::RateTable;
use rust_decimal::Decimal;
use tracing::trace;

use crate::catalog::{Provider, ProviderCatalog};
use crate::corridor::CorridorFees;
use crate::route::{Route, RouteKind};

/// Two-hop candidates whose combined fee exceeds this many percent are
/// dropped.
pub const MULTI_HOP_FEE_CEILING: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Delivery time shown for every two-hop route. Not derived from the legs.
pub const MULTI_HOP_SPEED_LABEL: &str = "2-4 days";

/// Builds unranked route candidates from one rate table, provider catalog
/// and corridor fee table.
pub struct RouteGenerator<'a> {
    table: &'a RateTable,
    catalog: &'a ProviderCatalog,
    corridors: &'a CorridorFees,
}

impl<'a> RouteGenerator<'a> {
    pub fn new(
        table: &'a RateTable,
        catalog: &'a ProviderCatalog,
        corridors: &'a CorridorFees,
    ) -> Self {
        Self {
            table,
            catalog,
            corridors,
        }
    }

    /// All candidates: direct routes in catalog order, then two-hop routes.
    ///
    /// Inputs are not validated; a non-positive amount yields non-positive
    /// figures and `from == to` yields identity conversions.
    pub fn generate(&self, amount: Decimal, from: &Currency, to: &Currency) -> Vec<Route> {
        let mut routes = self.direct_routes(amount, from, to);
        routes.extend(self.multi_hop_routes(amount, from, to));
        routes
    }

    /// One route per provider.
    pub fn direct_routes(&self, amount: Decimal, from: &Currency, to: &Currency) -> Vec<Route> {
        self.catalog
            .iter()
            .map(|provider| {
                let fee = self.corridors.effective_fee(provider, from, to);
                let fee_amount = percent_of(amount, fee);
                let converted_amount = self.table.convert(amount.saturating_sub(fee_amount), from, to);

                Route {
                    display_name: provider.name.clone(),
                    kind: RouteKind::Direct,
                    path: vec![from.clone(), to.clone()],
                    total_fee_percent: fee,
                    fee_amount,
                    converted_amount,
                    speed_label: provider.speed_label.clone(),
                    reliability_score: provider.reliability_score,
                    savings: Decimal::ZERO,
                }
            })
            .collect()
    }

    /// Routes through each intermediary currency for every pair of eligible
    /// providers, minus those over [`MULTI_HOP_FEE_CEILING`].
    pub fn multi_hop_routes(&self, amount: Decimal, from: &Currency, to: &Currency) -> Vec<Route> {
        let eligible = self.catalog.multi_hop_eligible();
        let mut routes = Vec::new();

        for via in Currency::multi_hop_intermediaries() {
            if via == *from || via == *to {
                continue;
            }

            for first in &eligible {
                for second in &eligible {
                    if let Some(route) = self.multi_hop_route(amount, from, &via, to, first, second) {
                        routes.push(route);
                    }
                }
            }
        }

        routes
    }

    fn multi_hop_route(
        &self,
        amount: Decimal,
        from: &Currency,
        via: &Currency,
        to: &Currency,
        first: &Provider,
        second: &Provider,
    ) -> Option<Route> {
        let fee1 = self.corridors.effective_fee(first, from, via);
        let fee2 = self.corridors.effective_fee(second, via, to);
        let total_fee = fee1 + fee2;

        if total_fee > MULTI_HOP_FEE_CEILING {
            trace!(
                first = %first.name,
                second = %second.name,
                via = %via,
                total_fee = %total_fee,
                "Pruned two-hop route over fee ceiling"
            );
            return None;
        }

        let intermediate = self
            .table
            .convert(amount.saturating_sub(percent_of(amount, fee1)), from, via);
        let converted_amount = self
            .table
            .convert(intermediate.saturating_sub(percent_of(intermediate, fee2)), via, to);

        Some(Route {
            display_name: format!("{} → {} via {}", first.name, second.name, via),
            kind: RouteKind::MultiHop,
            path: vec![from.clone(), via.clone(), to.clone()],
            total_fee_percent: total_fee,
            fee_amount: percent_of(amount, total_fee),
            converted_amount,
            speed_label: MULTI_HOP_SPEED_LABEL.to_string(),
            reliability_score: average_reliability(first, second),
            savings: Decimal::ZERO,
        })
    }
}

fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    amount.saturating_mul(percent) / Decimal::ONE_HUNDRED
}

/// Mean of two scores, halves rounded up.
fn average_reliability(first: &Provider, second: &Provider) -> u8 {
    let sum = u16::from(first.reliability_score) + u16::from(second.reliability_score);
    ((sum + 1) / 2) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct Fixture {
        table: RateTable,
        catalog: ProviderCatalog,
        corridors: CorridorFees,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                table: RateTable::seeded(),
                catalog: ProviderCatalog::default(),
                corridors: CorridorFees::default(),
            }
        }

        fn generator(&self) -> RouteGenerator<'_> {
            RouteGenerator::new(&self.table, &self.catalog, &self.corridors)
        }
    }

    #[test]
    fn test_direct_route_pricing() {
        let fx = Fixture::new();
        let routes = fx
            .generator()
            .direct_routes(dec!(1000), &Currency::usd(), &Currency::eur());

        assert_eq!(routes.len(), fx.catalog.len());

        let ofx = routes.iter().find(|r| r.display_name == "OFX").unwrap();
        assert_eq!(ofx.total_fee_percent, dec!(0.3));
        assert_eq!(ofx.fee_amount, dec!(3));
        assert_eq!(ofx.converted_amount, dec!(917.24));
        assert_eq!(ofx.path, vec![Currency::usd(), Currency::eur()]);
        assert_eq!(ofx.speed_label, "1-2 days");
        assert_eq!(ofx.reliability_score, 96);
        assert_eq!(ofx.kind, RouteKind::Direct);
    }

    #[test]
    fn test_multi_hop_excludes_endpoints_from_intermediaries() {
        let fx = Fixture::new();
        let routes = fx
            .generator()
            .multi_hop_routes(dec!(1000), &Currency::usd(), &Currency::eur());

        assert!(!routes.is_empty());
        for route in &routes {
            let via = route.intermediary().unwrap();
            assert_ne!(via, &Currency::usd());
            assert_ne!(via, &Currency::eur());
            assert_eq!(route.path.len(), 3);
            assert_eq!(route.speed_label, MULTI_HOP_SPEED_LABEL);
        }
        // Three intermediaries, at most nine provider pairs each.
        assert!(routes.len() <= 27);
    }

    #[test]
    fn test_multi_hop_route_pricing() {
        let fx = Fixture::new();
        let routes = fx
            .generator()
            .multi_hop_routes(dec!(1000), &Currency::usd(), &Currency::eur());

        // OFX on USD-GBP: 0.4 - 0.1 = 0.3; Wise on GBP-EUR: 0.5 - 0.05 = 0.45.
        let route = routes
            .iter()
            .find(|r| r.display_name == "OFX → Wise via GBP")
            .unwrap();

        assert_eq!(route.total_fee_percent, dec!(0.75));
        assert_eq!(route.fee_amount, dec!(7.5));
        // 997 USD -> 787.63 GBP, less 0.45% -> 784.085665 GBP, x 1.16 EUR.
        assert_eq!(route.converted_amount, dec!(909.5393714));
        // (96 + 98) / 2
        assert_eq!(route.reliability_score, 97);
    }

    #[test]
    fn test_reliability_average_rounds_half_up() {
        let a = Provider::new("A", dec!(0.5), "1 day", 98);
        let b = Provider::new("B", dec!(0.5), "1 day", 97);
        assert_eq!(average_reliability(&a, &b), 98);
        assert_eq!(average_reliability(&a, &a), 98);
    }

    #[test]
    fn test_fee_ceiling_prunes_expensive_pairs() {
        let fx = Fixture {
            table: RateTable::seeded(),
            catalog: ProviderCatalog::new(vec![
                Provider::new("Wise", dec!(1.5), "1-2 days", 98),
                Provider::new("OFX", dec!(1.4), "1-2 days", 96),
                Provider::new("XE", dec!(1.6), "1-3 days", 97),
            ])
            .unwrap(),
            corridors: CorridorFees::empty(),
        };

        let routes = fx
            .generator()
            .multi_hop_routes(dec!(1000), &Currency::new("AUD"), &Currency::new("CAD"));

        // Pairs with XE on one leg and Wise or XE on the other exceed 3.
        assert!(routes.iter().all(|r| r.total_fee_percent <= MULTI_HOP_FEE_CEILING));
        assert_eq!(routes.len(), 5 * 6);
        assert!(!routes.iter().any(|r| r.display_name.starts_with("XE → XE")));
    }

    #[test]
    fn test_fee_exactly_at_ceiling_is_kept() {
        let fx = Fixture {
            table: RateTable::seeded(),
            catalog: ProviderCatalog::new(vec![Provider::new("Wise", dec!(1.5), "1-2 days", 98)]).unwrap(),
            corridors: CorridorFees::empty(),
        };

        let routes = fx
            .generator()
            .multi_hop_routes(dec!(100), &Currency::new("AUD"), &Currency::new("CAD"));

        assert_eq!(routes.len(), 5);
        assert!(routes.iter().all(|r| r.total_fee_percent == dec!(3.0)));
    }

    #[test]
    fn test_zero_amount() {
        let fx = Fixture::new();
        let routes = fx.generator().generate(Decimal::ZERO, &Currency::usd(), &Currency::inr());

        assert!(!routes.is_empty());
        assert!(routes.iter().all(|r| r.converted_amount.is_zero() && r.fee_amount.is_zero()));
    }

    #[test]
    fn test_huge_amount_saturates_without_panicking() {
        let fx = Fixture::new();
        let amount = Decimal::from_i128_with_scale(10i128.pow(27), 0);

        let routes = fx.generator().generate(amount, &Currency::usd(), &Currency::jpy());

        assert!(!routes.is_empty());
        assert!(routes.iter().all(|r| r.converted_amount > Decimal::ZERO));
        assert!(routes.iter().any(|r| r.converted_amount == Decimal::MAX));
    }

    #[test]
    fn test_same_currency_is_not_rejected() {
        let fx = Fixture::new();
        let routes = fx.generator().generate(dec!(100), &Currency::usd(), &Currency::usd());

        let wise = routes.iter().find(|r| r.display_name == "Wise").unwrap();
        assert_eq!(wise.converted_amount, dec!(99.5));
    }
}
