//! Route table generation.
//!
//! # Data Flow
//! ```text
//! Package
//!     → discovery.rs   (walk modules, select handler classes)
//!     → synthesizer.rs (routes per handler and HTTP method)
//!     → table.rs       (synthesized routes ++ custom routes)
//!     → RouteTable, handed to the dispatcher
//! ```
//!
//! # Design Decisions
//! - Regenerated from scratch on every call; nothing is cached
//! - Deterministic: the same package and options give the same table
//! - Custom routes are appended as given; the dispatcher's first match wins

pub mod discovery;
pub mod live;
pub mod synthesizer;
pub mod table;

use crate::error::{LoadError, RouteResult};
use crate::handler::{HandlerRef, ModulePath, DEFAULT_HANDLER_BASES};
use crate::package::{Module, Package};

pub use discovery::{discover, Discovery};
pub use live::LiveRoutes;
pub use synthesizer::routes_for;
pub use table::{assemble, Route, RouteTable};

/// Caller-supplied adjustments to route generation.
#[derive(Debug, Clone)]
pub struct RouteOptions {
    /// Class names never routed automatically.
    pub exclusions: Vec<String>,

    /// Routes appended after the synthesized ones. Their handlers are not
    /// routed automatically.
    pub custom_routes: Vec<Route>,

    /// Base abstractions that make a class a handler.
    pub handler_bases: Vec<String>,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            exclusions: Vec::new(),
            custom_routes: Vec::new(),
            handler_bases: DEFAULT_HANDLER_BASES.iter().map(|b| b.to_string()).collect(),
        }
    }
}

impl RouteOptions {
    pub fn exclude(mut self, name: impl Into<String>) -> Self {
        self.exclusions.push(name.into());
        self
    }

    pub fn custom_route(mut self, route: Route) -> Self {
        self.custom_routes.push(route);
        self
    }

    pub fn handler_bases<I, S>(mut self, bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.handler_bases = bases.into_iter().map(Into::into).collect();
        self
    }
}

/// A generated table together with the modules the walk skipped.
#[derive(Debug)]
pub struct Generation {
    pub table: RouteTable,
    pub handlers: Vec<HandlerRef>,
    pub skipped: Vec<(ModulePath, LoadError)>,
}

/// Generate the route table of a package, reporting skipped modules.
pub fn generate(package: &dyn Package, options: &RouteOptions) -> RouteResult<Generation> {
    let discovery = discover(package, options)?;
    let generation = Generation::from_discovery(discovery, options)?;

    tracing::info!(
        package = %package.name(),
        handlers = generation.handlers.len(),
        routes = generation.table.len(),
        custom = options.custom_routes.len(),
        skipped = generation.skipped.len(),
        "Route table generated"
    );
    Ok(generation)
}

impl Generation {
    /// Synthesize routes for the handlers an earlier discovery selected.
    pub fn from_discovery(discovery: Discovery, options: &RouteOptions) -> RouteResult<Self> {
        let table = synthesize(&discovery.handlers, options)?;
        Ok(Self {
            table,
            handlers: discovery.handlers,
            skipped: discovery.skipped,
        })
    }
}

/// Generate the route table of a package.
///
/// ```
/// use autoroute::handler::{HandlerClass, MethodTable};
/// use autoroute::package::StaticPackage;
/// use autoroute::routing::{get_routes, RouteOptions};
///
/// let package = StaticPackage::new("api").module("api.helloworld", |m| {
///     m.class(
///         HandlerClass::new("api.helloworld", "HelloWorldHandler")
///             .with_methods(MethodTable::new().get(Vec::<String>::new())),
///     )
/// });
///
/// let table = get_routes(&package, &RouteOptions::default()).unwrap();
/// assert_eq!(table.patterns(), vec!["/helloworld/helloworld/?$"]);
/// ```
pub fn get_routes(package: &dyn Package, options: &RouteOptions) -> RouteResult<RouteTable> {
    generate(package, options).map(|g| g.table)
}

/// Generate the routes of a single loaded module.
pub fn module_routes(module: &Module, options: &RouteOptions) -> RouteResult<RouteTable> {
    let handlers = discovery::discover_module(module, options);
    synthesize(&handlers, options)
}

fn synthesize(handlers: &[HandlerRef], options: &RouteOptions) -> RouteResult<RouteTable> {
    let mut synthesized = Vec::new();
    for handler in handlers {
        synthesized.extend(routes_for(handler)?);
    }
    Ok(assemble(synthesized, &options.custom_routes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{HandlerClass, MethodTable};

    #[test]
    fn test_module_routes_appends_custom() {
        let hello = HandlerClass::new("api", "HelloWorldHandler")
            .with_methods(MethodTable::new().get(Vec::<String>::new()));
        let boom = HandlerClass::new("api", "ExplodingHandler")
            .with_methods(MethodTable::new().get(Vec::<String>::new()));
        let module = Module::new("api").class(hello).class(boom.clone());

        let options =
            RouteOptions::default().custom_route(Route::new("/api/explodinghandler", boom));
        let table = module_routes(&module, &options).unwrap();

        assert_eq!(table.patterns(), vec!["/helloworld/?$", "/api/explodinghandler"]);
    }

    #[test]
    fn test_default_options() {
        let options = RouteOptions::default();
        assert_eq!(options.handler_bases, vec!["APIHandler", "ViewHandler"]);
        assert!(options.exclusions.is_empty());
        assert!(options.custom_routes.is_empty());
    }
}
