//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the configuration file
//! - Open the handler package named by the configuration
//! - Resolve configured custom routes against the package's classes
//! - Generate the route table
//!
//! # Design Decisions
//! - Fail fast: any configuration or route error is fatal
//! - The package is walked once; custom routes reuse that walk

use std::path::Path;

use thiserror::Error;

use crate::config::loader::{load_or_default, ConfigError};
use crate::config::schema::{AutorouteConfig, PackageConfig, RoutingConfig};
use crate::error::{LoadError, RouteError, RouteResult};
use crate::package::DirPackage;
use crate::routing::{discover, Discovery, Generation, Route, RouteOptions};

/// Errors that stop route generation before a table exists.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Cannot open package: {0}")]
    Package(#[from] LoadError),

    #[error("Route error: {0}")]
    Route(#[from] RouteError),
}

/// Load the configuration at `path`, or validated defaults without one.
pub fn load_startup_config(path: Option<&Path>) -> Result<AutorouteConfig, StartupError> {
    Ok(load_or_default(path)?)
}

/// Open the configured package directory.
pub fn open_package(config: &PackageConfig) -> Result<DirPackage, LoadError> {
    match &config.name {
        Some(name) => DirPackage::with_name(&config.path, name.as_str()),
        None => DirPackage::open(&config.path),
    }
}

/// Turn configured custom routes into routes on the package's own classes.
pub fn resolve_custom_routes(
    routing: &RoutingConfig,
    discovery: &Discovery,
) -> RouteResult<Vec<Route>> {
    routing
        .custom_routes
        .iter()
        .map(|custom| {
            discovery
                .class(&custom.handler)
                .map(|class| Route::new(custom.pattern.clone(), class.clone()))
                .ok_or_else(|| RouteError::UnknownHandler {
                    pattern: custom.pattern.clone(),
                    handler: custom.handler.clone(),
                })
        })
        .collect()
}

/// Generate the route table described by `config`.
pub fn build_routes(config: &AutorouteConfig) -> Result<Generation, StartupError> {
    let package = open_package(&config.package)?;

    let base = config.routing.base_options();
    let discovery = discover(&package, &base)?;

    let options = RouteOptions {
        custom_routes: resolve_custom_routes(&config.routing, &discovery)?,
        ..base
    };
    let discovery = discovery.reselect(&options);
    let generation = Generation::from_discovery(discovery, &options)?;

    tracing::info!(
        package = %package.root().display(),
        handlers = generation.handlers.len(),
        routes = generation.table.len(),
        skipped = generation.skipped.len(),
        "Route table built from configuration"
    );
    Ok(generation)
}
