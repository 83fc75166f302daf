//! RemitRoute Routing
//!
//! Enumerates ways to move money from a source to a target currency, prices
//! each through a provider and corridor fee model, and ranks them by what
//! the recipient ends up with.
//!
//! Route generation is a pure, synchronous computation over the current
//! rate table. It never fails: missing rates fail open to `1` and inputs are
//! not validated here (see [`engine::validate_transfer`] for the
//! caller-facing guard).
//!
//! # Example
//!
//! ```rust,ignore
//! use remitroute_routing::RouteEngine;
//!
//! let engine = RouteEngine::default();
//! let routes = engine.generate_routes(dec!(1000), &Currency::usd(), &Currency::eur());
//! println!("best: {}", routes[0].display_name);
//! ```

pub mod catalog;
pub mod corridor;
pub mod route;
pub mod generator;
pub mod ranker;
pub mod engine;
pub mod config;

pub use catalog::{Provider, ProviderCatalog, MULTI_HOP_ELIGIBLE_PROVIDERS};
pub use corridor::{CorridorFees, MIN_FEE_PERCENT};
pub use route::{Route, RouteKind, RouteQuote};
pub use generator::{RouteGenerator, MULTI_HOP_FEE_CEILING, MULTI_HOP_SPEED_LABEL};
pub use ranker::{best_route, rank_routes, sort_and_annotate, MAX_ROUTES};
pub use engine::{validate_transfer, RouteEngine, MAX_TRANSFER_AMOUNT};
pub use config::EngineConfig;
