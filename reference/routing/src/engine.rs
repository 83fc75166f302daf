//! Route engine facade.

use remitroute_common::{Currency, QuoteId, RemitRouteError};
use remitroute_fx::{RateBook, RateSnapshot};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument};

use crate::catalog::ProviderCatalog;
use crate::corridor::CorridorFees;
use crate::generator::RouteGenerator;
use crate::ranker::rank_routes;
use crate::route::{Route, RouteQuote};

/// Answers route requests against the latest rate table.
///
/// The engine holds a [`RateBook`] handle, so a feed sharing the same book
/// can swap in new rates while requests are served. Each request reads one
/// table for its whole computation.
#[derive(Debug, Clone)]
pub struct RouteEngine {
    book: RateBook,
    catalog: ProviderCatalog,
    corridors: CorridorFees,
}

impl RouteEngine {
    /// Create an engine.
    pub fn new(book: RateBook, catalog: ProviderCatalog, corridors: CorridorFees) -> Self {
        Self {
            book,
            catalog,
            corridors,
        }
    }

    /// Default catalog and corridor fees over an existing rate book.
    pub fn with_book(book: RateBook) -> Self {
        Self::new(book, ProviderCatalog::default(), CorridorFees::default())
    }

    /// Ranked routes, best first, at most [`MAX_ROUTES`](crate::MAX_ROUTES).
    #[instrument(skip(self), fields(amount = %amount, from = %from, to = %to))]
    pub fn generate_routes(&self, amount: Decimal, from: &Currency, to: &Currency) -> Vec<Route> {
        let table = self.book.current();
        let candidates =
            RouteGenerator::new(&table, &self.catalog, &self.corridors).generate(amount, from, to);
        let candidate_count = candidates.len();

        let ranked = rank_routes(candidates);

        debug!(
            candidates = candidate_count,
            returned = ranked.len(),
            "Ranked routes"
        );

        ranked
    }

    /// The recommended route.
    pub fn best_route(&self, amount: Decimal, from: &Currency, to: &Currency) -> Option<Route> {
        self.generate_routes(amount, from, to).into_iter().next()
    }

    /// Ranked routes wrapped with an identifier and timestamp.
    pub fn quote(&self, amount: Decimal, from: &Currency, to: &Currency) -> RouteQuote {
        let routes = self.generate_routes(amount, from, to);
        let quote = RouteQuote {
            id: QuoteId::new(),
            amount,
            from: from.clone(),
            to: to.clone(),
            routes,
            quoted_at: chrono::Utc::now(),
        };

        if let Some(best) = quote.best() {
            info!(
                quote_id = %quote.id,
                best = %best.display_name,
                converted = %best.converted_amount,
                "Route quote ready"
            );
        }

        quote
    }

    /// Plain conversion at the current rate, without fees.
    pub fn convert(&self, amount: Decimal, from: &Currency, to: &Currency) -> Decimal {
        self.book.convert(amount, from, to)
    }

    /// Rebuild the rate table from a USD-quoted snapshot.
    pub fn rebuild_rates(&self, snapshot: &RateSnapshot) -> bool {
        self.book.rebuild(snapshot)
    }

    pub fn book(&self) -> &RateBook {
        &self.book
    }

    pub fn catalog(&self) -> &ProviderCatalog {
        &self.catalog
    }

    pub fn corridors(&self) -> &CorridorFees {
        &self.corridors
    }
}

impl Default for RouteEngine {
    fn default() -> Self {
        Self::with_book(RateBook::seeded())
    }
}

/// Largest amount accepted by [`validate_transfer`].
pub const MAX_TRANSFER_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Caller-facing checks the engine itself does not perform: a positive
/// amount no larger than [`MAX_TRANSFER_AMOUNT`], two different currencies,
/// both supported.
pub fn validate_transfer(
    amount: Decimal,
    from: &Currency,
    to: &Currency,
) -> Result<(), RemitRouteError> {
    if amount <= Decimal::ZERO || amount > MAX_TRANSFER_AMOUNT {
        return Err(RemitRouteError::InvalidAmount(amount.to_string()));
    }

    for currency in [from, to] {
        if !currency.is_supported() {
            return Err(RemitRouteError::UnsupportedCurrency(currency.clone()));
        }
    }

    if from == to {
        return Err(RemitRouteError::SameCurrency(from.clone()));
    }

    Ok(())
}
