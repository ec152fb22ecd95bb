//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::handler::DEFAULT_HANDLER_BASES;
use crate::routing::RouteOptions;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AutorouteConfig {
    /// Where the handler package lives.
    pub package: PackageConfig,

    /// Route generation settings.
    pub routing: RoutingConfig,

    /// Logging settings.
    pub observability: ObservabilityConfig,

    /// Watch mode settings.
    pub watch: WatchConfig,
}

/// Handler package location.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Package directory.
    pub path: PathBuf,

    /// Dotted package name; defaults to the directory name.
    pub name: Option<String>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("handlers"),
            name: None,
        }
    }
}

/// Route generation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Base abstractions that make a class a handler.
    pub handler_bases: Vec<String>,

    /// Class names never routed automatically.
    pub exclusions: Vec<String>,

    /// Routes appended after the generated ones.
    pub custom_routes: Vec<CustomRouteConfig>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            handler_bases: DEFAULT_HANDLER_BASES.iter().map(|b| b.to_string()).collect(),
            exclusions: Vec::new(),
            custom_routes: Vec::new(),
        }
    }
}

impl RoutingConfig {
    /// Options without custom routes; those need the package to resolve.
    pub fn base_options(&self) -> RouteOptions {
        RouteOptions {
            exclusions: self.exclusions.clone(),
            custom_routes: Vec::new(),
            handler_bases: self.handler_bases.clone(),
        }
    }
}

/// A custom route entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CustomRouteConfig {
    /// Pattern registered as given.
    pub pattern: String,

    /// Qualified name of a class in the package, e.g. `api.explode.ExplodingHandler`.
    pub handler: String,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Watch mode configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Poll interval for backends without native change events.
    pub poll_interval_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 2000,
        }
    }
}
