//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check custom routes name a qualified handler
//! - Validate value ranges (poll interval > 0, known log level)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AutorouteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::AutorouteConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("package.path must not be empty")]
    EmptyPackagePath,

    #[error("package.name `{0}` is not a dotted module path")]
    InvalidPackageName(String),

    #[error("routing.handler_bases must name at least one base")]
    NoHandlerBases,

    #[error("custom route #{index} has an empty pattern")]
    EmptyCustomPattern { index: usize },

    #[error("custom route `{pattern}` handler `{handler}` is not a qualified name")]
    UnqualifiedHandler { pattern: String, handler: String },

    #[error("observability.log_level `{0}` is not one of trace, debug, info, warn, error")]
    UnknownLogLevel(String),

    #[error("watch.poll_interval_ms must be greater than zero")]
    ZeroPollInterval,
}

/// Check `config` and collect every problem found.
pub fn validate_config(config: &AutorouteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.package.path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyPackagePath);
    }
    if let Some(name) = &config.package.name {
        if name.is_empty() || name.split('.').any(str::is_empty) {
            errors.push(ValidationError::InvalidPackageName(name.clone()));
        }
    }

    if config.routing.handler_bases.is_empty() {
        errors.push(ValidationError::NoHandlerBases);
    }
    for (index, route) in config.routing.custom_routes.iter().enumerate() {
        if route.pattern.trim().is_empty() {
            errors.push(ValidationError::EmptyCustomPattern { index });
        }
        if !route.handler.contains('.') {
            errors.push(ValidationError::UnqualifiedHandler {
                pattern: route.pattern.clone(),
                handler: route.handler.clone(),
            });
        }
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.observability.log_level.clone()));
    }

    if config.watch.poll_interval_ms == 0 {
        errors.push(ValidationError::ZeroPollInterval);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
