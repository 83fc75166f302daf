//! Route types returned to callers.

use chrono::{DateTime, Utc};
use remitroute_common::{Currency, QuoteId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shape of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteKind {
    /// One provider converts straight from source to target.
    Direct,
    /// Two providers convert through one intermediary currency.
    MultiHop,
}

/// A priced way to move an amount from one currency to another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Provider name, or `"{p1} → {p2} via {mid}"` for two-hop routes.
    pub display_name: String,
    pub kind: RouteKind,
    /// Currencies visited, source first.
    pub path: Vec<Currency>,
    /// Combined fee in percent.
    pub total_fee_percent: Decimal,
    /// Fee in source currency units.
    pub fee_amount: Decimal,
    /// What the recipient receives, in target currency units.
    pub converted_amount: Decimal,
    pub speed_label: String,
    pub reliability_score: u8,
    /// Converted amount above the worst candidate. Zero until ranked.
    pub savings: Decimal,
}

impl Route {
    /// Source currency.
    pub fn source(&self) -> Option<&Currency> {
        self.path.first()
    }

    /// Target currency.
    pub fn target(&self) -> Option<&Currency> {
        self.path.last()
    }

    /// Intermediary currency of a two-hop route.
    pub fn intermediary(&self) -> Option<&Currency> {
        match self.kind {
            RouteKind::MultiHop => self.path.get(1),
            RouteKind::Direct => None,
        }
    }

    /// Path rendered as `USD → GBP → EUR`.
    pub fn path_label(&self) -> String {
        self.path
            .iter()
            .map(Currency::code)
            .collect::<Vec<_>>()
            .join(" → ")
    }
}

/// Ranked answer to one route request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteQuote {
    pub id: QuoteId,
    pub amount: Decimal,
    pub from: Currency,
    pub to: Currency,
    /// Ranked routes, best first.
    pub routes: Vec<Route>,
    pub quoted_at: DateTime<Utc>,
}

impl RouteQuote {
    /// The recommended route.
    pub fn best(&self) -> Option<&Route> {
        self.routes.first()
    }
}
