//! URL segment naming rules.
//!
//! # Data Flow
//! ```text
//! HandlerClass (module path, name, method params)
//!     → module_segment    "/v1/users"
//!     → name_segment      "/profile"   (self, module or explicit end pattern)
//!     → args::build       "/(?P<id>[a-zA-Z0-9_]+)/?$"  or  "/?"
//!     → joined and anchored into one pattern
//! ```
//!
//! # Design Decisions
//! - Pure string functions, no state
//! - The root package component never appears in a URL
//! - Every derived pattern ends with `$`, the way the dispatcher compiles it

pub mod args;

use crate::error::{RouteError, RouteResult};
use crate::handler::ModulePath;

/// Optional trailing slash, the terminator every route ends with.
pub const OPTIONAL_SLASH: &str = "/?";

/// End-of-path anchor.
pub const ANCHOR: &str = "$";

/// Suffix stripped from class names by the self-naming rule.
const HANDLER_SUFFIX: &str = "handler";

/// Which rule names the segment after the module path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AutoNaming {
    /// Derived from the handler's own class name.
    SelfNamed,
    /// No name segment; the module path alone.
    Module,
}

/// Lowercase the class name with one trailing `Handler` removed.
///
/// `HelloWorldHandler` becomes `helloworld`, `FooBar` becomes `foobar`.
/// A class named just `Handler` has nothing left and is rejected.
pub fn segment_for_self(class_name: &str) -> RouteResult<String> {
    let lowered = class_name.to_lowercase();
    let stem = lowered.strip_suffix(HANDLER_SUFFIX).unwrap_or(&lowered);
    if stem.is_empty() {
        return Err(RouteError::EmptyHandlerName(class_name.to_string()));
    }
    Ok(stem.to_string())
}

/// Join the module components below the root package with `/`.
///
/// `api.v1.users` gives `/v1/users`; the root package itself gives `""`.
pub fn segment_for_module(module: &ModulePath) -> String {
    module
        .components()
        .iter()
        .skip(1)
        .fold(String::new(), |mut acc, part| {
            acc.push('/');
            acc.push_str(part);
            acc
        })
}

/// Reduce an end pattern entry to a bare name segment.
///
/// Entries may be written the way full patterns are (`/foo/?$`); the
/// separator and terminator are re-added once the argument segment is known.
pub fn normalize_end_pattern(entry: &str) -> &str {
    let trimmed = entry.trim_end_matches(ANCHOR);
    let trimmed = trimmed.strip_suffix(OPTIONAL_SLASH).unwrap_or(trimmed);
    trimmed.trim_matches('/')
}

/// Ensure `s` ends with `sub`, reusing any partial overlap at its end.
///
/// ```
/// use autoroute::naming::ensure_endswith;
///
/// assert_eq!(ensure_endswith("/api/?", "/?"), "/api/?");
/// assert_eq!(ensure_endswith("/api?", "/?"), "/api?/?");
/// assert_eq!(ensure_endswith("/api/", "/?"), "/api/?");
/// assert_eq!(ensure_endswith("/api/foobar", "/?"), "/api/foobar/?");
/// ```
pub fn ensure_endswith(s: &str, sub: &str) -> String {
    let mut rest = s;
    let mut match_started = false;
    for c in sub.chars().rev() {
        if let Some(stripped) = rest.strip_suffix(c) {
            match_started = true;
            rest = stripped;
        } else if match_started {
            rest = s;
            break;
        }
    }
    format!("{rest}{sub}")
}

/// Rewrite a caller-supplied pattern to end in `/?$`.
pub fn sanitize_pattern(pattern: &str) -> String {
    let stripped = pattern.trim_end_matches(ANCHOR);
    format!("{}{ANCHOR}", ensure_endswith(stripped, OPTIONAL_SLASH))
}

/// Append the end anchor unless the pattern already carries it.
pub(crate) fn anchored(mut pattern: String) -> String {
    if !pattern.ends_with(ANCHOR) {
        pattern.push_str(ANCHOR);
    }
    pattern
}
