//! Handler types and the static interface they expose for routing.
//!
//! # Responsibilities
//! - Describe a handler class: where it lives, what it is called, which
//!   HTTP methods it implements and with which parameters
//! - Carry the routing metadata attached by the annotation helpers
//! - Let plain Rust types register themselves via [`RequestHandler`]
//!
//! # Design Decisions
//! - Methods are declared in an explicit [`MethodTable`]; nothing is
//!   discovered by reflection
//! - A handler's identity is its qualified name (`module.Name`)
//! - Handlers are shared as [`HandlerRef`] so routes can point at them cheaply

pub mod meta;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::RouteError;

pub use meta::{annotate, mark_base_route, Annotation, HandlerMeta, PatternArg};

/// Shared handle to a handler class; the second half of every route.
pub type HandlerRef = Arc<HandlerClass>;

/// Base abstractions recognized as request handlers unless configured otherwise.
pub const DEFAULT_HANDLER_BASES: &[&str] = &["APIHandler", "ViewHandler"];

/// HTTP methods a handler may implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
}

impl HttpMethod {
    /// Canonical order in which methods are visited during synthesis.
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
    ];

    /// Lowercase method name, as handler functions are named.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Patch => "patch",
            HttpMethod::Head => "head",
            HttpMethod::Options => "options",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a method name is not an HTTP method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMethod(pub String);

impl FromStr for HttpMethod {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

/// Dotted module path such as `api.v1.users`.
///
/// The first component is the root package.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModulePath(Vec<String>);

impl ModulePath {
    /// Parse a `.` or `::` separated path. Empty components are dropped.
    pub fn parse(path: &str) -> Self {
        let sep = if path.contains("::") { "::" } else { "." };
        Self(
            path.split(sep)
                .filter(|part| !part.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn components(&self) -> &[String] {
        &self.0
    }

    pub fn root(&self) -> Option<&str> {
        self.0.first().map(String::as_str)
    }

    /// Last component: the module's own name.
    pub fn leaf(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Path of a direct child module.
    pub fn join(&self, child: &str) -> Self {
        let mut parts = self.0.clone();
        parts.push(child.to_string());
        Self(parts)
    }

    /// True when `self` is `other` or lives below it.
    pub fn starts_with(&self, other: &ModulePath) -> bool {
        self.0.starts_with(&other.0)
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

impl From<&str> for ModulePath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

/// Explicit table of the HTTP methods a handler implements.
///
/// Parameter lists exclude the receiver; a parameter literally named
/// `self` is dropped for the same reason.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodTable {
    entries: Vec<(HttpMethod, Vec<String>)>,
}

impl MethodTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `method` with the given parameters, replacing any earlier declaration.
    pub fn method<I, S>(mut self, method: HttpMethod, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let params: Vec<String> = params
            .into_iter()
            .map(Into::into)
            .filter(|p| p != "self")
            .collect();
        match self.entries.iter_mut().find(|(m, _)| *m == method) {
            Some(entry) => entry.1 = params,
            None => self.entries.push((method, params)),
        }
        self
    }

    pub fn get<I: IntoIterator<Item = S>, S: Into<String>>(self, params: I) -> Self {
        self.method(HttpMethod::Get, params)
    }

    pub fn post<I: IntoIterator<Item = S>, S: Into<String>>(self, params: I) -> Self {
        self.method(HttpMethod::Post, params)
    }

    pub fn put<I: IntoIterator<Item = S>, S: Into<String>>(self, params: I) -> Self {
        self.method(HttpMethod::Put, params)
    }

    pub fn delete<I: IntoIterator<Item = S>, S: Into<String>>(self, params: I) -> Self {
        self.method(HttpMethod::Delete, params)
    }

    pub fn patch<I: IntoIterator<Item = S>, S: Into<String>>(self, params: I) -> Self {
        self.method(HttpMethod::Patch, params)
    }

    pub fn head<I: IntoIterator<Item = S>, S: Into<String>>(self, params: I) -> Self {
        self.method(HttpMethod::Head, params)
    }

    pub fn options<I: IntoIterator<Item = S>, S: Into<String>>(self, params: I) -> Self {
        self.method(HttpMethod::Options, params)
    }

    /// Parameters of `method`, or `None` when the handler does not implement it.
    pub fn params(&self, method: HttpMethod) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(m, _)| *m == method)
            .map(|(_, params)| params.as_slice())
    }

    /// Implemented methods in canonical order.
    pub fn implemented(&self) -> impl Iterator<Item = (HttpMethod, &[String])> + '_ {
        HttpMethod::ALL
            .into_iter()
            .filter_map(move |m| self.params(m).map(|p| (m, p)))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A request-handling type as seen by the route generator.
#[derive(Debug, Clone)]
pub struct HandlerClass {
    module: ModulePath,
    name: String,
    bases: Vec<String>,
    methods: MethodTable,
    meta: HandlerMeta,
}

impl HandlerClass {
    /// A class named `name` defined in `module`, deriving from `APIHandler`.
    pub fn new(module: impl Into<ModulePath>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
            bases: vec!["APIHandler".to_string()],
            methods: MethodTable::default(),
            meta: HandlerMeta::default(),
        }
    }

    /// Build the class description of a Rust handler type.
    pub fn of<T: RequestHandler>() -> Self {
        Self::new(ModulePath::parse(T::MODULE), T::NAME)
            .with_bases(T::BASES.iter().copied())
            .with_methods(T::methods())
            .with_meta(T::meta())
    }

    pub fn with_bases<I, S>(mut self, bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bases = bases.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_methods(mut self, methods: MethodTable) -> Self {
        self.methods = methods;
        self
    }

    pub fn with_meta(mut self, meta: HandlerMeta) -> Self {
        self.meta = meta;
        self
    }

    pub fn module(&self) -> &ModulePath {
        &self.module
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bases(&self) -> &[String] {
        &self.bases
    }

    pub fn methods(&self) -> &MethodTable {
        &self.methods
    }

    pub fn meta(&self) -> &HandlerMeta {
        &self.meta
    }

    /// `module.Name`, unique within a package.
    pub fn qualified_name(&self) -> String {
        if self.module.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.module, self.name)
        }
    }

    pub fn into_ref(self) -> HandlerRef {
        Arc::new(self)
    }
}

impl PartialEq for HandlerClass {
    fn eq(&self, other: &Self) -> bool {
        self.module == other.module && self.name == other.name
    }
}

impl Eq for HandlerClass {}

impl Hash for HandlerClass {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.module.hash(state);
        self.name.hash(state);
    }
}

/// Static interface a Rust type implements to be routed automatically.
///
/// ```
/// use autoroute::handler::{HandlerClass, MethodTable, RequestHandler};
///
/// struct GreetingHandler;
///
/// impl RequestHandler for GreetingHandler {
///     const NAME: &'static str = "GreetingHandler";
///     const MODULE: &'static str = "api::greeting";
///
///     fn methods() -> MethodTable {
///         MethodTable::new().get(["fname", "lname"])
///     }
/// }
///
/// let class = HandlerClass::of::<GreetingHandler>();
/// assert_eq!(class.qualified_name(), "api.greeting.GreetingHandler");
/// ```
pub trait RequestHandler: 'static {
    /// Simple type name.
    const NAME: &'static str;

    /// Defining module, usually `module_path!()`.
    const MODULE: &'static str;

    /// Base abstractions this handler derives from.
    const BASES: &'static [&'static str] = &["APIHandler"];

    fn methods() -> MethodTable;

    fn meta() -> HandlerMeta {
        HandlerMeta::default()
    }
}

pub(crate) fn parse_method(handler: &str, method: &str) -> Result<HttpMethod, RouteError> {
    method.parse().map_err(|UnknownMethod(method)| RouteError::UnknownMethod {
        handler: handler.to_string(),
        method,
    })
}
