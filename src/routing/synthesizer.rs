//! Per-handler route synthesis.
//!
//! For every HTTP method the handler implements, in canonical order:
//! 1. build the argument segment from the method's parameters
//! 2. one route per end pattern: module segment, end pattern, arguments
//! 3. one route per custom pattern, verbatim
//! 4. the self-named route unless suppressed, the module route if requested
//!
//! Routes repeated across methods are kept once, at first occurrence.

use std::collections::HashSet;

use crate::error::RouteResult;
use crate::handler::HandlerRef;
use crate::naming::args::{self, ArgSource};
use crate::naming::{
    anchored, normalize_end_pattern, segment_for_module, segment_for_self, AutoNaming,
};
use crate::routing::table::Route;

/// Synthesize the routes of one handler.
pub fn routes_for(handler: &HandlerRef) -> RouteResult<Vec<Route>> {
    let qualified = handler.qualified_name();
    let meta = handler.meta();
    let module_segment = segment_for_module(handler.module());

    let mut patterns: Vec<String> = Vec::new();
    for (method, params) in handler.methods().implemented() {
        let arg_segment = args::build(
            params,
            ArgSource {
                handler: &qualified,
                method: method.as_str(),
            },
        )?;

        for end in meta.end_patterns() {
            patterns.push(join(&module_segment, Some(normalize_end_pattern(end)), &arg_segment));
        }

        patterns.extend(meta.custom_patterns().iter().cloned());

        if !meta.no_auto_route() {
            patterns.push(auto_route(
                handler,
                AutoNaming::SelfNamed,
                &module_segment,
                &arg_segment,
            )?);
        }
        if meta.route_base() {
            patterns.push(auto_route(handler, AutoNaming::Module, &module_segment, &arg_segment)?);
        }
    }

    let mut seen = HashSet::new();
    let routes: Vec<Route> = patterns
        .into_iter()
        .filter(|p| seen.insert(p.clone()))
        .map(|pattern| Route::new(pattern, handler.clone()))
        .collect();

    for route in &routes {
        tracing::debug!(handler = %qualified, pattern = %route.pattern, "Synthesized route");
    }
    if routes.is_empty() {
        tracing::debug!(handler = %qualified, "Handler produced no routes");
    }
    Ok(routes)
}

fn auto_route(
    handler: &HandlerRef,
    naming: AutoNaming,
    module_segment: &str,
    arg_segment: &str,
) -> RouteResult<String> {
    let name = match naming {
        AutoNaming::SelfNamed => Some(segment_for_self(handler.name())?),
        AutoNaming::Module => None,
    };
    Ok(join(module_segment, name.as_deref(), arg_segment))
}

/// `module + "/" + name + args`, anchored. An absent or empty name adds nothing.
fn join(module_segment: &str, name: Option<&str>, arg_segment: &str) -> String {
    let name_segment = match name {
        Some(name) if !name.is_empty() => format!("/{name}"),
        _ => String::new(),
    };
    anchored(format!("{module_segment}{name_segment}{arg_segment}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RouteError;
    use crate::handler::{annotate, HandlerClass, HandlerMeta, MethodTable, PatternArg};

    fn patterns(handler: HandlerClass) -> Vec<String> {
        routes_for(&handler.into_ref())
            .unwrap()
            .into_iter()
            .map(|r| r.pattern)
            .collect()
    }

    fn no_args() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn test_self_named_route() {
        let hello = HandlerClass::new("api.helloworld", "HelloWorldHandler")
            .with_methods(MethodTable::new().get(no_args()));
        assert_eq!(patterns(hello), vec!["/helloworld/helloworld/?$"]);
    }

    #[test]
    fn test_root_module_has_no_module_segment() {
        let hello = HandlerClass::new("api", "HelloWorldHandler")
            .with_methods(MethodTable::new().get(no_args()));
        assert_eq!(patterns(hello), vec!["/helloworld/?$"]);
    }

    #[test]
    fn test_identical_methods_collapse() {
        let hello = HandlerClass::new("api.helloworld", "HelloWorldHandler")
            .with_methods(MethodTable::new().get(no_args()).post(no_args()));
        assert_eq!(patterns(hello), vec!["/helloworld/helloworld/?$"]);
    }

    #[test]
    fn test_methods_with_different_args() {
        let users = HandlerClass::new("api.users", "UserHandler")
            .with_methods(MethodTable::new().post(no_args()).get(["user_id"]));
        assert_eq!(
            patterns(users),
            vec![
                "/users/user/(?P<user_id>[a-zA-Z0-9_]+)/?$",
                "/users/user/?$",
            ]
        );
    }

    #[test]
    fn test_end_patterns_replace_self_name() {
        let meta =
            HandlerMeta::default().annotated(&annotate(PatternArg::None, ["foo", "bar"], true));
        let hello = HandlerClass::new("api.helloworld", "HelloWorldHandler")
            .with_methods(MethodTable::new().get(no_args()))
            .with_meta(meta);
        assert_eq!(patterns(hello), vec!["/helloworld/foo/?$", "/helloworld/bar/?$"]);
    }

    #[test]
    fn test_end_pattern_with_terminator_and_args() {
        let meta = HandlerMeta::default().annotated(&annotate(PatternArg::None, "greet/?$", true));
        let greeting = HandlerClass::new("api.greeting", "GreetingHandler")
            .with_methods(MethodTable::new().get(["fname", "lname"]))
            .with_meta(meta);
        assert_eq!(
            patterns(greeting),
            vec!["/greeting/greet/(?P<fname>[a-zA-Z0-9_]+)/(?P<lname>[a-zA-Z0-9_]+)/?$"]
        );
    }

    #[test]
    fn test_end_pattern_leading_slash_is_dropped() {
        let meta = HandlerMeta::default()
            .route(PatternArg::None, ["", "/foo"], false)
            .base_route();
        let handler = HandlerClass::new("api.x", "XHandler")
            .with_methods(MethodTable::new().get(no_args()))
            .with_meta(meta);
        assert_eq!(patterns(handler), vec!["/x/?$", "/x/foo/?$"]);
    }

    #[test]
    fn test_custom_patterns_are_verbatim() {
        let meta = HandlerMeta::default().annotated(&annotate(
            ["/api/helloworld/foobar", "/legacy/hello/?$"],
            "helloworld",
            true,
        ));
        let hello = HandlerClass::new("api.helloworld", "HelloWorldHandler")
            .with_methods(MethodTable::new().get(["ignored"]))
            .with_meta(meta);
        assert_eq!(
            patterns(hello),
            vec![
                "/helloworld/helloworld/(?P<ignored>[a-zA-Z0-9_]+)/?$",
                "/api/helloworld/foobar/?$",
                "/legacy/hello/?$",
            ]
        );
    }

    #[test]
    fn test_base_route_with_auto_route() {
        let meta = HandlerMeta::default()
            .base_route()
            .annotated(&annotate(PatternArg::None, PatternArg::None, false));
        let images = HandlerClass::new("api.images", "ImagesHandler")
            .with_methods(MethodTable::new().get(no_args()))
            .with_meta(meta);
        assert_eq!(patterns(images), vec!["/images/images/?$", "/images/?$"]);
    }

    #[test]
    fn test_base_route_alone() {
        let images = HandlerClass::new("api.images", "ImageHandler")
            .with_methods(MethodTable::new().get(["image_id"]))
            .with_meta(HandlerMeta::default().base_route());
        assert_eq!(
            patterns(images),
            vec!["/images/(?P<image_id>[a-zA-Z0-9_]+)/?$"]
        );
    }

    #[test]
    fn test_no_methods_no_routes() {
        let idle = HandlerClass::new("api.idle", "IdleHandler");
        assert!(patterns(idle).is_empty());
    }

    #[test]
    fn test_bare_handler_name_is_an_error() {
        let bare = HandlerClass::new("api.misc", "Handler")
            .with_methods(MethodTable::new().get(no_args()))
            .into_ref();
        assert_eq!(
            routes_for(&bare).unwrap_err(),
            RouteError::EmptyHandlerName("Handler".into())
        );

        // Not an error when the self-named route is suppressed.
        let based = HandlerClass::new("api.misc", "Handler")
            .with_methods(MethodTable::new().get(no_args()))
            .with_meta(HandlerMeta::default().base_route());
        assert_eq!(patterns(based), vec!["/misc/?$"]);
    }

    #[test]
    fn test_capture_errors_surface() {
        let dup = HandlerClass::new("api.misc", "DupHandler")
            .with_methods(MethodTable::new().put(["id", "id"]))
            .into_ref();
        assert!(matches!(
            routes_for(&dup),
            Err(RouteError::DuplicateCaptureName { ref method, .. }) if method == "put"
        ));
    }
}
