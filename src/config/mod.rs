//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → AutorouteConfig (validated, immutable)
//!
//! In watch mode:
//!     watcher.rs detects a change under the package directory
//!     → lifecycle::startup regenerates the route table
//!     → new table sent to the watch loop
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, load_or_default, parse_config, ConfigError};
pub use schema::AutorouteConfig;
pub use schema::CustomRouteConfig;
pub use schema::PackageConfig;
pub use schema::RoutingConfig;
