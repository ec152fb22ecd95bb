//! Error definitions for route generation.

use thiserror::Error;

/// Fatal errors raised while building a route table.
///
/// None of these are retried. A route table is either built completely or
/// the caller sees one of these naming the offending handler.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// An annotation received a value that is neither a string nor a list of strings.
    #[error("Unsupported type `{found}` for `{field}`; expected a string or a list of strings")]
    UnsupportedPatternShape { field: &'static str, found: String },

    /// A method parameter cannot be used as a capture-group name.
    #[error("Invalid capture name `{param}` in {handler}.{method}")]
    InvalidCaptureName {
        handler: String,
        method: String,
        param: String,
    },

    /// Two parameters of the same method share a name.
    #[error("Duplicate capture name `{param}` in {handler}.{method}")]
    DuplicateCaptureName {
        handler: String,
        method: String,
        param: String,
    },

    /// Stripping the `Handler` suffix left nothing to name the route after.
    #[error("Handler `{0}` has no name left after stripping the `Handler` suffix")]
    EmptyHandlerName(String),

    /// A method name outside the canonical HTTP method set.
    #[error("Unknown HTTP method `{method}` on handler `{handler}`")]
    UnknownMethod { handler: String, method: String },

    /// A custom route refers to a handler the package does not define.
    #[error("Custom route `{pattern}` refers to unknown handler `{handler}`")]
    UnknownHandler { pattern: String, handler: String },
}

/// Result type for route generation.
pub type RouteResult<T> = Result<T, RouteError>;

/// Reasons a single module could not be loaded during a package walk.
///
/// These never abort discovery; the module simply contributes no handlers.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Module `{0}` not found")]
    NotFound(String),

    /// The module parsed but declares something the route model cannot hold.
    #[error("Invalid module: {0}")]
    Invalid(#[from] RouteError),
}
