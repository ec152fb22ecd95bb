//! Automatic URL routing for trees of request handlers.
//!
//! Walk a package of handler modules, pick out the handler classes and
//! derive a URL pattern for each from where it lives, what it is called,
//! the parameters of its HTTP methods and its routing annotations.

pub mod config;
pub mod error;
pub mod handler;
pub mod lifecycle;
pub mod naming;
pub mod observability;
pub mod package;
pub mod routing;

pub use error::{LoadError, RouteError, RouteResult};
pub use handler::{
    annotate, mark_base_route, HandlerClass, HandlerMeta, HttpMethod, MethodTable, RequestHandler,
};
pub use package::{DirPackage, Package, StaticPackage};
pub use routing::{get_routes, Route, RouteOptions, RouteTable};
