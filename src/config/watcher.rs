//! Package watcher for live route regeneration.

use std::path::PathBuf;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::schema::AutorouteConfig;
use crate::lifecycle::startup::build_routes;
use crate::routing::Generation;

/// Watches the handler package and regenerates routes when it changes.
pub struct RouteWatcher {
    path: PathBuf,
    config: AutorouteConfig,
    update_tx: mpsc::UnboundedSender<Generation>,
}

impl RouteWatcher {
    /// Create a new RouteWatcher for the package named in `config`.
    ///
    /// Returns the watcher and a receiver for regenerated route tables.
    pub fn new(config: AutorouteConfig) -> (Self, mpsc::UnboundedReceiver<Generation>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: config.package.path.clone(),
                config,
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching the package in a background thread.
    ///
    /// A failed regeneration is logged and the previous table stays current.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.update_tx.clone();
        let config = self.config.clone();
        let poll_interval = Duration::from_millis(self.config.watch.poll_interval_ms);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove() {
                        tracing::info!(
                            paths = ?event.paths,
                            "Package change detected, regenerating routes..."
                        );
                        match build_routes(&config) {
                            Ok(generation) => {
                                let _ = tx.send(generation);
                            }
                            Err(e) => {
                                tracing::error!(
                                    "Failed to regenerate routes: {}. Keeping current table.",
                                    e
                                );
                            }
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(poll_interval),
        )?;

        watcher.watch(&self.path, RecursiveMode::Recursive)?;

        tracing::info!(path = ?self.path, "Package watcher started");
        Ok(watcher)
    }
}
