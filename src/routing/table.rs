//! Routes and the assembled route table.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::handler::HandlerRef;

/// A URL pattern mapped to the handler that serves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub pattern: String,
    pub handler: HandlerRef,
}

impl Route {
    pub fn new(pattern: impl Into<String>, handler: impl Into<HandlerRef>) -> Self {
        Self {
            pattern: pattern.into(),
            handler: handler.into(),
        }
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Route", 2)?;
        state.serialize_field("pattern", &self.pattern)?;
        state.serialize_field("handler", &self.handler.qualified_name())?;
        state.end()
    }
}

/// Ordered routes, ready to register with a first-match-wins dispatcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Route> {
        self.routes.iter()
    }

    pub fn patterns(&self) -> Vec<&str> {
        self.routes.iter().map(|r| r.pattern.as_str()).collect()
    }

    /// First route with exactly this pattern.
    pub fn find(&self, pattern: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.pattern == pattern)
    }

    /// Patterns routed to the handler with this qualified name, in table order.
    pub fn patterns_for(&self, qualified_name: &str) -> Vec<&str> {
        self.routes
            .iter()
            .filter(|r| r.handler.qualified_name() == qualified_name)
            .map(|r| r.pattern.as_str())
            .collect()
    }

    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a Route;
    type IntoIter = std::slice::Iter<'a, Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

impl IntoIterator for RouteTable {
    type Item = Route;
    type IntoIter = std::vec::IntoIter<Route>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.into_iter()
    }
}

impl fmt::Display for RouteTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.routes.iter().map(|r| r.pattern.len()).max().unwrap_or(0);
        for route in &self.routes {
            writeln!(f, "{:<width$}  {}", route.pattern, route.handler.qualified_name())?;
        }
        Ok(())
    }
}

/// Synthesized routes first, then the caller's custom routes, unfiltered.
pub fn assemble(synthesized: Vec<Route>, custom: &[Route]) -> RouteTable {
    let mut routes = synthesized;
    routes.extend_from_slice(custom);
    RouteTable { routes }
}
