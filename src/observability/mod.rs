//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! discovery, synthesis, watcher
//!     → tracing events (module skipped, route synthesized, table built)
//!     → logging.rs subscriber → stderr
//! ```

pub mod logging;

pub use logging::init_logging;
