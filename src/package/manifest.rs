//! On-disk module file schema.
//!
//! A module file lists the handlers defined in that module:
//!
//! ```toml
//! [[handler]]
//! name = "GreetingHandler"
//! bases = ["APIHandler"]
//!
//! [handler.methods]
//! get = ["fname", "lname"]
//!
//! [handler.route]
//! end_pattern = ["hi", "hello"]
//! no_auto_route = false
//! ```
//!
//! A `[handler.route]` table applies [`annotate`](crate::handler::annotate);
//! `base_route = true` applies [`mark_base_route`](crate::handler::mark_base_route)
//! after it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::RouteResult;
use crate::handler::{
    annotate, parse_method, HandlerClass, HandlerMeta, MethodTable, ModulePath, PatternArg,
};
use crate::package::Module;

/// Root of a module file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ModuleFile {
    /// Handlers defined in the module.
    #[serde(rename = "handler")]
    pub handlers: Vec<HandlerEntry>,
}

/// One handler class.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HandlerEntry {
    /// Class name.
    pub name: String,

    /// Base abstractions the class derives from.
    #[serde(default = "default_bases")]
    pub bases: Vec<String>,

    /// HTTP method name → parameter names, receiver excluded.
    #[serde(default)]
    pub methods: BTreeMap<String, Vec<String>>,

    /// Route customization.
    #[serde(default)]
    pub route: Option<RouteEntry>,

    /// Also route the bare module path to this handler.
    #[serde(default)]
    pub base_route: bool,
}

/// Arguments to the route annotation.
///
/// Patterns stay untyped until conversion so that a wrong shape surfaces
/// as a configuration error naming the field.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteEntry {
    #[serde(default)]
    pub pattern: Option<toml::Value>,

    #[serde(default)]
    pub end_pattern: Option<toml::Value>,

    #[serde(default = "default_true")]
    pub no_auto_route: bool,
}

fn default_bases() -> Vec<String> {
    vec!["APIHandler".to_string()]
}

fn default_true() -> bool {
    true
}

impl ModuleFile {
    /// Resolve every entry into a handler class of module `path`.
    pub fn into_module(self, path: &ModulePath) -> RouteResult<Module> {
        self.handlers
            .into_iter()
            .try_fold(Module::new(path.clone()), |module, entry| {
                Ok(module.class(entry.into_class(path)?))
            })
    }
}

impl HandlerEntry {
    pub fn into_class(self, module: &ModulePath) -> RouteResult<HandlerClass> {
        let qualified = format!("{module}.{}", self.name);

        let methods = self
            .methods
            .into_iter()
            .try_fold(
                MethodTable::new(),
                |table, (method, params)| -> RouteResult<MethodTable> {
                    Ok(table.method(parse_method(&qualified, &method)?, params))
                },
            )?;

        let mut meta = HandlerMeta::default();
        if let Some(route) = self.route {
            let pattern = PatternArg::from_value("pattern", route.pattern.as_ref())?;
            let end_pattern = PatternArg::from_value("end_pattern", route.end_pattern.as_ref())?;
            meta = meta.annotated(&annotate(pattern, end_pattern, route.no_auto_route));
        }
        if self.base_route {
            meta = meta.base_route();
        }

        Ok(HandlerClass::new(module.clone(), self.name)
            .with_bases(self.bases)
            .with_methods(methods)
            .with_meta(meta))
    }
}
