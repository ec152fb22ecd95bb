//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Open package → Resolve custom routes → Generate
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Stop watch mode
//! ```

pub mod signals;
pub mod startup;

pub use startup::{build_routes, load_startup_config, StartupError};
