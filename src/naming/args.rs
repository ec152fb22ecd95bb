//! Argument-capture segment builder.
//!
//! Each method parameter becomes a named group matching `[a-zA-Z0-9_]+`,
//! in declaration order.

use std::collections::HashSet;

use crate::error::{RouteError, RouteResult};
use crate::naming::{ANCHOR, OPTIONAL_SLASH};

/// Character class every captured argument is restricted to.
pub const ARG_CLASS: &str = "[a-zA-Z0-9_]+";

/// Where the parameters come from, for error reporting.
#[derive(Debug, Clone, Copy)]
pub struct ArgSource<'a> {
    pub handler: &'a str,
    pub method: &'a str,
}

/// Build the trailing segment for a parameter list.
///
/// An empty list gives the bare `/?` terminator. Otherwise every name
/// becomes `(?P<name>[a-zA-Z0-9_]+)`, joined with `/`, followed by `/?$`.
pub fn build<S: AsRef<str>>(params: &[S], source: ArgSource<'_>) -> RouteResult<String> {
    if params.is_empty() {
        return Ok(OPTIONAL_SLASH.to_string());
    }

    let mut seen = HashSet::with_capacity(params.len());
    let mut captures = Vec::with_capacity(params.len());
    for param in params {
        let param = param.as_ref();
        if !is_capture_name(param) {
            return Err(RouteError::InvalidCaptureName {
                handler: source.handler.to_string(),
                method: source.method.to_string(),
                param: param.to_string(),
            });
        }
        if !seen.insert(param) {
            return Err(RouteError::DuplicateCaptureName {
                handler: source.handler.to_string(),
                method: source.method.to_string(),
                param: param.to_string(),
            });
        }
        captures.push(format!("(?P<{param}>{ARG_CLASS})"));
    }

    Ok(format!("/{}{OPTIONAL_SLASH}{ANCHOR}", captures.join("/")))
}

/// Group names must be identifiers: alphanumeric or `_`, not starting with a digit.
fn is_capture_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
