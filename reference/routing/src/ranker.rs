//! Route ranking.

use rust_decimal::Decimal;

use crate::route::Route;

/// Most routes returned for one request.
pub const MAX_ROUTES: usize = 8;

/// Sort routes best first and fill in their savings, without truncating.
///
/// The sort is stable, so routes with equal converted amounts keep their
/// generation order. Savings are measured against the last (worst) route.
pub fn sort_and_annotate(mut routes: Vec<Route>) -> Vec<Route> {
    routes.sort_by(|a, b| b.converted_amount.cmp(&a.converted_amount));

    let worst = routes
        .last()
        .map(|r| r.converted_amount)
        .unwrap_or(Decimal::ZERO);

    for route in &mut routes {
        route.savings = route.converted_amount.saturating_sub(worst);
    }

    routes
}

/// Rank candidates and keep the best [`MAX_ROUTES`].
///
/// Savings are computed over every candidate before truncation, so they stay
/// comparable with the full candidate set.
pub fn rank_routes(routes: Vec<Route>) -> Vec<Route> {
    let mut ranked = sort_and_annotate(routes);
    ranked.truncate(MAX_ROUTES);
    ranked
}

/// The recommended route of a ranked list.
pub fn best_route(ranked: &[Route]) -> Option<&Route> {
    ranked.first()
}
