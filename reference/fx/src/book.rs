//! Shared, copy-on-write handle to the current rate table.

use std::sync::Arc;

use parking_lot::RwLock;
use remitroute_common::Currency;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::source::RateSnapshot;
use crate::table::RateTable;

/// Handle to the latest [`RateTable`].
///
/// Cloning the book shares the underlying table. Readers take an `Arc` to
/// whichever table is current; a refresh builds a complete new table and
/// swaps the pointer, so a reader never observes a half-rebuilt matrix.
#[derive(Debug, Clone)]
pub struct RateBook {
    current: Arc<RwLock<Arc<RateTable>>>,
}

impl RateBook {
    /// Create a book holding `table`.
    pub fn new(table: RateTable) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(table))),
        }
    }

    /// Create a book holding the static seed table.
    pub fn seeded() -> Self {
        Self::new(RateTable::seeded())
    }

    /// The table in effect right now.
    pub fn current(&self) -> Arc<RateTable> {
        self.current.read().clone()
    }

    /// Replace the whole table.
    pub fn replace(&self, table: RateTable) {
        *self.current.write() = Arc::new(table);
    }

    /// Rebuild from a USD-quoted snapshot. Returns `false` (keeping the
    /// previous table) when the snapshot lacks the USD anchor or yields a
    /// cross rate too large for a `Decimal`.
    pub fn rebuild(&self, snapshot: &RateSnapshot) -> bool {
        let base = self.current();
        match base.rebuilt_from_usd_snapshot(snapshot) {
            Some(table) => {
                info!(
                    source = %snapshot.source,
                    currencies = table.len(),
                    "Rate table rebuilt from snapshot"
                );
                self.replace(table);
                true
            }
            None => {
                warn!(
                    source = %snapshot.source,
                    base = %snapshot.base,
                    "Snapshot unusable, keeping previous table"
                );
                false
            }
        }
    }

    /// Convert using the current table.
    pub fn convert(&self, amount: Decimal, from: &Currency, to: &Currency) -> Decimal {
        self.current().convert(amount, from, to)
    }
}

impl Default for RateBook {
    fn default() -> Self {
        Self::seeded()
    }
}
