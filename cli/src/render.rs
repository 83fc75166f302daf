//! Plain-text rendering for terminal output.

use remitroute_common::{Currency, Money};
use remitroute_fx::RateTable;
use remitroute_routing::RouteQuote;
use rust_decimal::Decimal;

/// Ranked routes as a table, with the recommended route marked.
pub fn quote_table(quote: &RouteQuote) -> String {
    let mut lines = vec![
        format!(
            "Sending {} → {}",
            Money::new(quote.amount, quote.from.clone()).display_with_symbol(),
            quote.to
        ),
        format!("Quote {} at {}", quote.id, quote.quoted_at.to_rfc3339()),
        String::new(),
        format!(
            "{:<4} {:<28} {:<20} {:>7} {:>14} {:>16} {:>14} {:<10} {:>5}",
            "#", "Route", "Path", "Fee %", "Fee", "Receive", "Savings", "Speed", "Rel."
        ),
    ];

    lines.extend(quote.routes.iter().enumerate().map(|(rank, route)| {
        let marker = if rank == 0 { "BEST" } else { "" };
        format!(
            "{:<4} {:<28} {:<20} {:>7} {:>14} {:>16} {:>14} {:<10} {:>5} {}",
            rank + 1,
            route.display_name,
            route.path_label(),
            route.total_fee_percent.normalize().to_string(),
            Money::new(route.fee_amount, quote.from.clone()).display_with_symbol(),
            Money::new(route.converted_amount, quote.to.clone()).display_with_symbol(),
            Money::new(route.savings, quote.to.clone()).display_with_symbol(),
            route.speed_label,
            route.reliability_score,
            marker
        )
    }));

    to_block(lines)
}

/// One mid-market conversion with the rate used.
pub fn conversion(
    amount: Decimal,
    from: &Currency,
    converted: Decimal,
    to: &Currency,
    rate: Decimal,
) -> String {
    format!(
        "{} = {} (1 {} = {} {})",
        Money::new(amount, from.clone()).display_with_symbol(),
        Money::new(converted, to.clone()).round().display_with_symbol(),
        from,
        rate.normalize(),
        to
    )
}

/// Rates from `base` to every other currency in the table.
pub fn rate_row(base: &Currency, table: &RateTable) -> String {
    let mut lines = vec![format!("1 {} =", base)];
    lines.extend(
        table
            .currencies()
            .filter(|c| *c != base)
            .map(|target| format!("  {:>14} {}", table.rate(base, target).normalize(), target)),
    );

    to_block(lines)
}

/// Newline-terminated lines.
fn to_block(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use remitroute_routing::RouteEngine;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quote_table_marks_best_route() {
        let quote = RouteEngine::default().quote(dec!(1000), &Currency::usd(), &Currency::eur());
        let table = quote_table(&quote);

        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[0].starts_with("Sending $1,000.00"));

        let best = lines.iter().find(|l| l.trim_end().ends_with("BEST")).unwrap();
        assert!(best.contains("Crypto Bridge"));
        assert!(best.contains("€918.16"));
        assert_eq!(table.matches("BEST").count(), 1);
        assert_eq!(table.lines().count(), 4 + quote.routes.len());
        assert!(table.ends_with('\n'));
        assert!(table.contains("USD → EUR"));
    }

    #[test]
    fn test_conversion_line() {
        let line = conversion(
            dec!(1000),
            &Currency::usd(),
            dec!(920),
            &Currency::eur(),
            dec!(0.920),
        );
        assert_eq!(line, "$1,000.00 = €920.00 (1 USD = 0.92 EUR)");
    }

    #[test]
    fn test_rate_row_skips_base() {
        let row = rate_row(&Currency::usd(), &RateTable::seeded());

        assert!(row.starts_with("1 USD ="));
        assert!(row.contains("0.92 EUR"));
        assert!(!row.contains(" USD\n"));
        assert_eq!(row.lines().count(), 11);
    }
}
