//! Handler discovery.
//!
//! # Responsibilities
//! - Walk a package and collect the classes each module defines
//! - Keep classes whose ancestry reaches a recognized handler base
//! - Drop excluded classes and classes already given custom routes
//!
//! # Design Decisions
//! - Ancestry is followed through intermediate classes defined anywhere in
//!   the package; a base the package does not define is matched by name only
//! - Output order is traversal order, each handler at most once

use std::collections::{HashMap, HashSet};

use crate::error::{LoadError, RouteResult};
use crate::handler::{HandlerRef, ModulePath};
use crate::package::{walk, Module, Package};
use crate::routing::RouteOptions;

/// Result of walking a package.
#[derive(Debug, Default)]
pub struct Discovery {
    /// Every class defined in a loaded module, in traversal order.
    pub classes: Vec<HandlerRef>,

    /// Classes that qualify for automatic routes.
    pub handlers: Vec<HandlerRef>,

    /// Modules that could not be loaded.
    pub skipped: Vec<(ModulePath, LoadError)>,
}

impl Discovery {
    /// Look up a defined class by qualified name.
    pub fn class(&self, qualified_name: &str) -> Option<&HandlerRef> {
        self.classes.iter().find(|c| c.qualified_name() == qualified_name)
    }

    /// Select handlers again under different options, without re-walking.
    pub fn reselect(mut self, options: &RouteOptions) -> Self {
        self.handlers = select(&self.classes, options);
        self
    }
}

/// Walk `package` and select its handlers.
pub fn discover(package: &dyn Package, options: &RouteOptions) -> RouteResult<Discovery> {
    let mut modules = walk(package);
    let mut classes = Vec::new();
    for module in modules.by_ref() {
        classes.extend(module?.defined_classes().cloned());
    }
    let skipped = modules.into_skipped();

    let handlers = select(&classes, options);
    tracing::debug!(
        package = %package.name(),
        classes = classes.len(),
        handlers = handlers.len(),
        skipped = skipped.len(),
        "Discovery complete"
    );

    Ok(Discovery {
        classes,
        handlers,
        skipped,
    })
}

/// Select the handlers of a single module.
pub fn discover_module(module: &Module, options: &RouteOptions) -> Vec<HandlerRef> {
    let classes: Vec<HandlerRef> = module.defined_classes().cloned().collect();
    select(&classes, options)
}

fn select(classes: &[HandlerRef], options: &RouteOptions) -> Vec<HandlerRef> {
    let ancestry = Ancestry::new(classes, &options.handler_bases);
    let custom: HashSet<&str> = options
        .custom_routes
        .iter()
        .map(|r| r.handler.name())
        .collect();

    let mut seen = HashSet::new();
    classes
        .iter()
        .filter(|c| ancestry.is_handler(c))
        .filter(|c| !options.exclusions.iter().any(|e| e == c.name()))
        .filter(|c| !custom.contains(c.name()))
        .filter(|c| seen.insert(c.qualified_name()))
        .cloned()
        .collect()
}

/// Resolves class bases against the classes known to the package.
struct Ancestry<'a> {
    by_name: HashMap<&'a str, Vec<&'a HandlerRef>>,
    recognized: &'a [String],
}

impl<'a> Ancestry<'a> {
    fn new(classes: &'a [HandlerRef], recognized: &'a [String]) -> Self {
        let mut by_name: HashMap<&str, Vec<&HandlerRef>> = HashMap::new();
        for class in classes {
            by_name.entry(class.name()).or_default().push(class);
        }
        Self { by_name, recognized }
    }

    fn is_handler(&self, class: &HandlerRef) -> bool {
        let mut visited = HashSet::new();
        self.reaches_base(class, &mut visited)
    }

    fn reaches_base(&self, class: &HandlerRef, visited: &mut HashSet<String>) -> bool {
        if !visited.insert(class.qualified_name()) {
            return false;
        }
        class.bases().iter().any(|base| {
            // Bases may be written qualified; match on the simple name.
            let simple = base.rsplit(['.', ':']).next().unwrap_or(base);
            self.recognized.iter().any(|r| r == simple)
                || self
                    .by_name
                    .get(simple)
                    .is_some_and(|parents| parents.iter().any(|p| self.reaches_base(p, visited)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{HandlerClass, MethodTable};
    use crate::package::StaticPackage;
    use crate::routing::table::Route;

    fn class(module: &str, name: &str, bases: &[&str]) -> HandlerClass {
        HandlerClass::new(module, name)
            .with_bases(bases.iter().copied())
            .with_methods(MethodTable::new().get(Vec::<String>::new()))
    }

    fn names(handlers: &[HandlerRef]) -> Vec<String> {
        handlers.iter().map(|h| h.qualified_name()).collect()
    }

    #[test]
    fn test_only_handler_subclasses_qualify() {
        let pkg = StaticPackage::new("api").module("api.misc", |m| {
            m.class(class("api.misc", "Helper", &["object"]))
                .class(class("api.misc", "PingHandler", &["APIHandler"]))
                .class(class(
                    "api.misc",
                    "PageHandler",
                    &["tornado_json.requesthandlers.ViewHandler"],
                ))
        });

        let found = discover(&pkg, &RouteOptions::default()).unwrap();
        assert_eq!(found.classes.len(), 3);
        assert_eq!(names(&found.handlers), vec!["api.misc.PingHandler", "api.misc.PageHandler"]);
    }

    #[test]
    fn test_ancestry_through_intermediate_classes() {
        let pkg = StaticPackage::new("api")
            .module("api.base", |m| m.class(class("api.base", "JsonBase", &["APIHandler"])))
            .module("api.users", |m| {
                m.class(class("api.users", "UsersHandler", &["JsonBase"]))
                    .class(class("api.users", "LoopA", &["LoopB"]))
                    .class(class("api.users", "LoopB", &["LoopA"]))
            });

        let found = discover(&pkg, &RouteOptions::default()).unwrap();
        assert_eq!(names(&found.handlers), vec!["api.base.JsonBase", "api.users.UsersHandler"]);
    }

    #[test]
    fn test_exclusions_and_custom_routes_suppress() {
        let custom = class("api.misc", "CustomHandler", &["APIHandler"]);
        let pkg = StaticPackage::new("api").module("api.misc", |m| {
            m.class(class("api.misc", "KeptHandler", &["APIHandler"]))
                .class(class("api.misc", "DebugHandler", &["APIHandler"]))
                .class(custom.clone())
        });
        let options = RouteOptions::default()
            .exclude("DebugHandler")
            .custom_route(Route::new("/custom", custom));

        let found = discover(&pkg, &options).unwrap();
        assert_eq!(names(&found.handlers), vec!["api.misc.KeptHandler"]);
        assert!(found.class("api.misc.DebugHandler").is_some());
    }

    #[test]
    fn test_custom_bases() {
        let module = Module::new("app.views")
            .class(class("app.views", "HomeView", &["View"]))
            .class(class("app.views", "PingHandler", &["APIHandler"]));
        let options = RouteOptions::default().handler_bases(["View"]);

        assert_eq!(names(&discover_module(&module, &options)), vec!["app.views.HomeView"]);
    }
}
