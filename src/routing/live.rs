//! Hot-swappable route table.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::routing::table::RouteTable;

/// The current route table, replaced whole on regeneration.
///
/// Readers take a snapshot and never block the writer. The epoch counts
/// replacements, starting at zero.
pub struct LiveRoutes {
    epoch: AtomicU64,
    table: ArcSwap<RouteTable>,
}

impl LiveRoutes {
    pub fn new(initial: RouteTable) -> Self {
        Self {
            epoch: AtomicU64::new(0),
            table: ArcSwap::new(Arc::new(initial)),
        }
    }

    /// Current table.
    pub fn snapshot(&self) -> Arc<RouteTable> {
        self.table.load_full()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Install a new table; returns the new epoch.
    pub fn replace(&self, table: RouteTable) -> u64 {
        self.table.store(Arc::new(table));
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Default for LiveRoutes {
    fn default() -> Self {
        Self::new(RouteTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::HandlerClass;
    use crate::routing::table::{assemble, Route};

    #[test]
    fn test_replace_swaps_table_and_bumps_epoch() {
        let live = LiveRoutes::default();
        let before = live.snapshot();
        assert!(before.is_empty());
        assert_eq!(live.epoch(), 0);

        let hello = HandlerClass::new("api.helloworld", "HelloWorldHandler");
        let routes = vec![Route::new("/helloworld/helloworld/?$", hello)];
        let epoch = live.replace(assemble(routes, &[]));

        assert_eq!(epoch, 1);
        assert_eq!(live.snapshot().len(), 1);
        // Old snapshots stay valid.
        assert!(before.is_empty());
    }
}
