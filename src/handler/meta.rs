//! Routing metadata carried by a handler, and the helpers that set it.

use crate::error::{RouteError, RouteResult};
use crate::naming::sanitize_pattern;

/// Per-handler routing overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandlerMeta {
    no_auto_route: bool,
    route_base: bool,
    end_patterns: Vec<String>,
    custom_patterns: Vec<String>,
}

impl HandlerMeta {
    /// Suppress the self-named route.
    pub fn no_auto_route(&self) -> bool {
        self.no_auto_route
    }

    /// Also route the bare module path to this handler.
    pub fn route_base(&self) -> bool {
        self.route_base
    }

    /// Name segments used in place of the handler's own name.
    pub fn end_patterns(&self) -> &[String] {
        &self.end_patterns
    }

    /// Complete patterns, already sanitized.
    pub fn custom_patterns(&self) -> &[String] {
        &self.custom_patterns
    }

    /// Apply an [`annotate`] result.
    pub fn annotated(self, annotation: &Annotation) -> Self {
        annotation.apply(self)
    }

    /// Builder form of [`annotate`].
    pub fn route(
        self,
        pattern: impl Into<PatternArg>,
        end_pattern: impl Into<PatternArg>,
        no_auto_route: bool,
    ) -> Self {
        annotate(pattern, end_pattern, no_auto_route).apply(self)
    }

    /// Apply [`mark_base_route`].
    pub fn base_route(self) -> Self {
        mark_base_route(self)
    }
}

/// A pattern argument: nothing, one string or a list of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PatternArg {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl PatternArg {
    /// Convert an untyped config value, rejecting anything but strings and string lists.
    pub fn from_value(field: &'static str, value: Option<&toml::Value>) -> RouteResult<Self> {
        let unsupported = |found: String| RouteError::UnsupportedPatternShape { field, found };
        match value {
            None => Ok(PatternArg::None),
            Some(toml::Value::String(s)) => Ok(PatternArg::One(s.clone())),
            Some(toml::Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    toml::Value::String(s) => Ok(s.clone()),
                    other => Err(unsupported(format!("array of {}", other.type_str()))),
                })
                .collect::<RouteResult<Vec<_>>>()
                .map(PatternArg::Many),
            Some(other) => Err(unsupported(other.type_str().to_string())),
        }
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            PatternArg::None => Vec::new(),
            PatternArg::One(s) => vec![s],
            PatternArg::Many(v) => v,
        }
    }
}

impl From<&str> for PatternArg {
    fn from(s: &str) -> Self {
        PatternArg::One(s.to_string())
    }
}

impl From<String> for PatternArg {
    fn from(s: String) -> Self {
        PatternArg::One(s)
    }
}

impl From<Vec<String>> for PatternArg {
    fn from(v: Vec<String>) -> Self {
        PatternArg::Many(v)
    }
}

impl From<Vec<&str>> for PatternArg {
    fn from(v: Vec<&str>) -> Self {
        PatternArg::Many(v.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for PatternArg {
    fn from(v: [&str; N]) -> Self {
        PatternArg::Many(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<T: Into<PatternArg>> From<Option<T>> for PatternArg {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or_default()
    }
}

/// The effect of one [`annotate`] call, ready to apply to a handler's metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    custom_patterns: Vec<String>,
    end_patterns: Vec<String>,
    no_auto_route: bool,
}

impl Annotation {
    /// Overwrite the end patterns, custom patterns and auto-route flag.
    ///
    /// `route_base` is left as it was.
    pub fn apply(&self, meta: HandlerMeta) -> HandlerMeta {
        HandlerMeta {
            no_auto_route: self.no_auto_route,
            end_patterns: self.end_patterns.clone(),
            custom_patterns: self.custom_patterns.clone(),
            ..meta
        }
    }
}

/// Customize how a handler is routed.
///
/// `pattern` gives complete URL patterns, each rewritten to end in `/?$`.
/// `end_pattern` gives name segments that replace the handler's own name.
/// With `no_auto_route` false the self-named route is kept as well.
///
/// ```
/// use autoroute::handler::{annotate, HandlerMeta, PatternArg};
///
/// let meta = HandlerMeta::default().annotated(&annotate(PatternArg::None, ["foo", "bar"], true));
/// assert_eq!(meta.end_patterns(), ["foo", "bar"]);
/// assert!(meta.no_auto_route());
/// ```
pub fn annotate(
    pattern: impl Into<PatternArg>,
    end_pattern: impl Into<PatternArg>,
    no_auto_route: bool,
) -> Annotation {
    Annotation {
        custom_patterns: pattern
            .into()
            .into_vec()
            .iter()
            .map(|p| sanitize_pattern(p))
            .collect(),
        end_patterns: end_pattern.into().into_vec(),
        no_auto_route,
    }
}

/// Route the handler's module path to it instead of its own name.
pub fn mark_base_route(meta: HandlerMeta) -> HandlerMeta {
    HandlerMeta {
        route_base: true,
        no_auto_route: true,
        ..meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_builder_matches_annotate() {
        let built = HandlerMeta::default().route("/api/free/will", ["freewill"], false);
        let annotated = HandlerMeta::default()
            .annotated(&annotate("/api/free/will", ["freewill"], false));

        assert_eq!(built, annotated);
        assert_eq!(built.custom_patterns(), ["/api/free/will/?$"]);
        assert_eq!(built.end_patterns(), ["freewill"]);
        assert!(!built.no_auto_route());
    }

    #[test]
    fn test_default_meta() {
        let meta = HandlerMeta::default();
        assert!(!meta.no_auto_route());
        assert!(!meta.route_base());
        assert!(meta.end_patterns().is_empty());
        assert!(meta.custom_patterns().is_empty());
    }

    #[test]
    fn test_annotate_normalizes_shapes() {
        let one = annotate("/api/helloworld/foobar", "helloworld", true);
        let meta = one.apply(HandlerMeta::default());
        assert_eq!(meta.custom_patterns(), ["/api/helloworld/foobar/?$"]);
        assert_eq!(meta.end_patterns(), ["helloworld"]);

        let none = annotate(None::<&str>, PatternArg::None, false);
        let meta = none.apply(HandlerMeta::default());
        assert!(meta.custom_patterns().is_empty());
        assert!(meta.end_patterns().is_empty());
        assert!(!meta.no_auto_route());
    }

    #[test]
    fn test_base_route_sets_both_flags() {
        let meta = mark_base_route(HandlerMeta::default());
        assert!(meta.route_base());
        assert!(meta.no_auto_route());
    }

    #[test]
    fn test_annotation_keeps_route_base() {
        let meta = HandlerMeta::default()
            .base_route()
            .annotated(&annotate(PatternArg::None, "popular", false));
        assert!(meta.route_base());
        assert!(!meta.no_auto_route());
        assert_eq!(meta.end_patterns(), ["popular"]);
    }

    #[test]
    fn test_pattern_arg_from_value() {
        let s = toml::Value::String("foo".into());
        assert_eq!(
            PatternArg::from_value("end_pattern", Some(&s)),
            Ok(PatternArg::One("foo".into()))
        );

        let arr = toml::Value::Array(vec!["a".into(), "b".into()]);
        assert_eq!(
            PatternArg::from_value("end_pattern", Some(&arr)).unwrap().into_vec(),
            vec!["a".to_string(), "b".to_string()]
        );

        assert_eq!(PatternArg::from_value("pattern", None), Ok(PatternArg::None));
    }

    #[test]
    fn test_pattern_arg_rejects_other_shapes() {
        let int = toml::Value::Integer(3);
        assert_eq!(
            PatternArg::from_value("pattern", Some(&int)),
            Err(RouteError::UnsupportedPatternShape {
                field: "pattern",
                found: "integer".into(),
            })
        );

        let mixed = toml::Value::Array(vec!["a".into(), toml::Value::Boolean(true)]);
        assert!(matches!(
            PatternArg::from_value("end_pattern", Some(&mixed)),
            Err(RouteError::UnsupportedPatternShape { field: "end_pattern", .. })
        ));
    }
}
