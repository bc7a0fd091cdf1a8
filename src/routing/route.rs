//! A single registered route: pattern, method filter, handler, and the
//! match metadata computed once at registration time.
//!
//! Routes are immutable after construction. The only transformation a
//! registered route supports is [`SubRoute::prefixed`], which builds a
//! *new* route with the cached metadata recomputed, never mutating the
//! original in place.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use axum::http::Method;
use axum::http::request::Parts;
use axum::response::Response;
use futures_util::future::BoxFuture;
use serde_json::Value;

use super::args::RequestArgs;
use super::path::normalize;

/// One template segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches exactly this string.
    Literal(String),
    /// `:name` — matches any single segment and binds it under `name`.
    Param(String),
    /// `*` — matches the remainder of the path.
    Wildcard,
}

impl Segment {
    fn parse(raw: &str) -> Self {
        if raw == "*" {
            Self::Wildcard
        } else if let Some(name) = raw.strip_prefix(':') {
            Self::Param(name.to_owned())
        } else {
            Self::Literal(raw.to_owned())
        }
    }
}

/// HTTP method filter for a route.
///
/// The method string is compared verbatim against the request method, so
/// custom methods are allowed; `"*"` accepts any method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodFilter {
    /// Accepts every request method.
    Any,
    /// Accepts only the given method string (e.g. `GET`, `POST`, `CUSTOM`).
    Only(String),
}

impl MethodFilter {
    fn parse(raw: &str) -> Self {
        if raw == "*" {
            Self::Any
        } else {
            Self::Only(raw.to_owned())
        }
    }

    fn accepts(&self, method: &Method) -> bool {
        match self {
            Self::Any => true,
            Self::Only(expected) => method.as_str() == expected,
        }
    }
}

/// Future returned by a boxed route handler.
pub type HandlerFuture<T> = BoxFuture<'static, T>;

/// The two calling conventions a route handler may use.
///
/// Dispatch over this enum is exhaustive, so there is no "unrecognized
/// handler signature" failure mode: a route always carries exactly one
/// of these variants.
pub enum RouteHandler {
    /// Returns a JSON value; the router serializes it, applies the
    /// `HTTPStatusCode` protocol, and writes the response.
    Data(Arc<dyn Fn(RequestArgs) -> HandlerFuture<Value> + Send + Sync>),
    /// Builds the complete HTTP response itself; the router returns it
    /// untouched and takes no further action.
    Raw(Arc<dyn Fn(Parts, RequestArgs) -> HandlerFuture<Response> + Send + Sync>),
}

impl RouteHandler {
    /// Wraps an async function of the argument bundle into a data handler.
    pub fn data<F, Fut>(f: F) -> Self
    where
        F: Fn(RequestArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Value> + Send + 'static,
    {
        Self::Data(Arc::new(move |args| Box::pin(f(args))))
    }

    /// Wraps an async function of the request head and argument bundle
    /// into a raw handler that owns the entire response.
    pub fn raw<F, Fut>(f: F) -> Self
    where
        F: Fn(Parts, RequestArgs) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self::Raw(Arc::new(move |parts, args| Box::pin(f(parts, args))))
    }
}

impl fmt::Debug for RouteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Data(_) => f.write_str("RouteHandler::Data"),
            Self::Raw(_) => f.write_str("RouteHandler::Raw"),
        }
    }
}

impl Clone for RouteHandler {
    fn clone(&self) -> Self {
        match self {
            Self::Data(handler) => Self::Data(Arc::clone(handler)),
            Self::Raw(handler) => Self::Raw(Arc::clone(handler)),
        }
    }
}

/// One registered route of a [`SubRouter`](super::SubRouter).
///
/// `glob_index` and `is_default` are computed once here and never
/// recomputed per request.
#[derive(Debug, Clone)]
pub struct SubRoute {
    pattern: Vec<Segment>,
    method: MethodFilter,
    handler: RouteHandler,
    glob_index: Option<usize>,
    is_default: bool,
}

impl SubRoute {
    /// Builds a route from a URI template, a method string, and a handler.
    ///
    /// The template is normalized with the same rules as a request path,
    /// so `"/code/:code"`, `"code/:code"` and `"code//:code/"` are the
    /// same pattern.
    #[must_use]
    pub fn new(template: &str, method: &str, handler: RouteHandler) -> Self {
        let pattern: Vec<Segment> = normalize(template)
            .iter()
            .map(|segment| Segment::parse(segment))
            .collect();
        let glob_index = pattern
            .iter()
            .position(|segment| matches!(segment, Segment::Wildcard));
        Self {
            pattern,
            method: MethodFilter::parse(method),
            handler,
            glob_index,
            // A route registered as a lone `*` at the router's root is the
            // fallback for that sub-router's own unmatched root.
            is_default: glob_index == Some(0),
        }
    }

    /// Returns a new route with `prefix` prepended as a literal segment.
    ///
    /// The cached wildcard index shifts by one and `is_default` carries
    /// over: a route registered as `*` keeps catching its sub-router's
    /// root after being mounted under a prefix.
    #[must_use]
    pub fn prefixed(self, prefix: &str) -> Self {
        let mut pattern = Vec::with_capacity(self.pattern.len() + 1);
        pattern.push(Segment::Literal(prefix.to_owned()));
        pattern.extend(self.pattern);
        Self {
            pattern,
            method: self.method,
            handler: self.handler,
            glob_index: self.glob_index.map(|index| index + 1),
            is_default: self.is_default,
        }
    }

    /// Decides whether this route handles the given path and method.
    ///
    /// The checks run in a fixed order: method filter, leading-wildcard
    /// catch-all, the default-route root check, length compatibility,
    /// the empty-root case, then a left-to-right positional walk where a
    /// wildcard short-circuits to a match, a parameter accepts anything,
    /// and a literal must compare equal.
    #[must_use]
    pub fn matches(&self, path: &[String], method: &Method) -> bool {
        if !self.method.accepts(method) {
            return false;
        }

        // Pattern begins with a wildcard: intentional catch-all.
        if self.glob_index == Some(0) {
            return true;
        }

        // A default route mounted under e.g. ["misc", "*"] also catches a
        // bare request to ["misc"].
        if self.is_default && self.matches_own_root(path) {
            return true;
        }

        let glob_absorbs = self.glob_index.is_some_and(|index| index < path.len());
        if path.len() != self.pattern.len() && !glob_absorbs {
            return false;
        }
        if path.is_empty() && self.pattern.is_empty() {
            // Root request to the bare application.
            return true;
        }

        for (index, value) in path.iter().enumerate() {
            match self.pattern.get(index) {
                Some(Segment::Wildcard) => return true,
                Some(Segment::Param(_)) => {}
                Some(Segment::Literal(literal)) => {
                    if literal != value {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }

    /// Positional check for default routes: every pattern segment except
    /// the trailing wildcard must equal the path segment at its index. A
    /// path shorter than the prefix is not this route's root.
    fn matches_own_root(&self, path: &[String]) -> bool {
        let prefix_len = self.pattern.len().saturating_sub(1);
        if path.len() < prefix_len {
            return false;
        }
        self.pattern
            .iter()
            .take(prefix_len)
            .enumerate()
            .all(|(index, segment)| match (segment, path.get(index)) {
                (Segment::Literal(literal), Some(value)) => literal == value,
                _ => false,
            })
    }

    /// Binds each `:name` pattern segment to the path segment at the
    /// same index.
    ///
    /// Only meaningful after [`Self::matches`] returned `true`; positions
    /// beyond the path are skipped.
    #[must_use]
    pub fn route_params(&self, path: &[String]) -> HashMap<String, String> {
        let mut params = HashMap::new();
        for (index, segment) in self.pattern.iter().enumerate() {
            if let (Segment::Param(name), Some(value)) = (segment, path.get(index)) {
                params.insert(name.clone(), value.clone());
            }
        }
        params
    }

    /// Returns the handler registered for this route.
    #[must_use]
    pub fn handler(&self) -> &RouteHandler {
        &self.handler
    }

    /// Returns the cached index of the first wildcard segment, if any.
    #[must_use]
    pub fn glob_index(&self) -> Option<usize> {
        self.glob_index
    }

    /// Returns `true` if this route is its sub-router's default route.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.is_default
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    fn segs(path: &[&str]) -> Vec<String> {
        path.iter().map(|s| (*s).to_owned()).collect()
    }

    fn noop() -> RouteHandler {
        RouteHandler::data(|_args| async { json!({}) })
    }

    #[test]
    fn template_parses_into_typed_segments() {
        let route = SubRoute::new("/file/:name/*", "GET", noop());
        assert_eq!(route.glob_index(), Some(2));
        assert!(!route.is_default());
    }

    #[test]
    fn lone_wildcard_is_default() {
        let route = SubRoute::new("*", "*", noop());
        assert_eq!(route.glob_index(), Some(0));
        assert!(route.is_default());
    }

    #[test]
    fn method_filter_rejects_other_methods() {
        let route = SubRoute::new("/foo", "GET", noop());
        assert!(route.matches(&segs(&["foo"]), &Method::GET));
        assert!(!route.matches(&segs(&["foo"]), &Method::POST));
    }

    #[test]
    fn star_method_accepts_anything() {
        let route = SubRoute::new("/foo", "*", noop());
        assert!(route.matches(&segs(&["foo"]), &Method::DELETE));
        let Ok(custom) = Method::from_bytes(b"CUSTOM") else {
            panic!("valid method token");
        };
        assert!(route.matches(&segs(&["foo"]), &custom));
    }

    #[test]
    fn trailing_wildcard_absorbs_remainder() {
        let route = SubRoute::new("/file/*", "GET", noop());
        assert!(route.matches(&segs(&["file", "a", "b.png"]), &Method::GET));
        assert!(route.matches(&segs(&["file", "x"]), &Method::GET));
        assert!(!route.matches(&segs(&["other"]), &Method::GET));
    }

    #[test]
    fn param_segment_matches_any_value() {
        let route = SubRoute::new("/code/:code", "*", noop());
        assert!(route.matches(&segs(&["code", "200"]), &Method::GET));
        assert!(route.matches(&segs(&["code", "anything"]), &Method::GET));
        assert!(!route.matches(&segs(&["code"]), &Method::GET));
        assert!(!route.matches(&segs(&["code", "200", "extra"]), &Method::GET));
    }

    #[test]
    fn route_params_bind_by_position() {
        let route = SubRoute::new("/code/:code", "*", noop());
        let params = route.route_params(&segs(&["code", "200"]));
        assert_eq!(params.get("code"), Some(&"200".to_owned()));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn length_mismatch_without_wildcard_is_no_match() {
        let route = SubRoute::new("/a/b", "*", noop());
        assert!(!route.matches(&segs(&["a"]), &Method::GET));
        assert!(!route.matches(&segs(&["a", "b", "c"]), &Method::GET));
    }

    #[test]
    fn wildcard_beyond_path_length_is_no_match() {
        // Pattern /a/b/* cannot absorb a two-segment path: the wildcard
        // sits at index 2, past the end of ["a", "x"].
        let route = SubRoute::new("/a/b/*", "*", noop());
        assert!(!route.matches(&segs(&["a", "x"]), &Method::GET));
    }

    #[test]
    fn wildcard_as_last_template_matches_shorter_path_at_own_root() {
        // A default route mounted under a prefix catches the bare prefix.
        let route = SubRoute::new("*", "*", noop()).prefixed("misc");
        assert!(route.matches(&segs(&["misc"]), &Method::GET));
        assert!(route.matches(&segs(&["misc", "anything", "at", "all"]), &Method::GET));
    }

    #[test]
    fn default_route_shorter_path_is_no_match() {
        // Twice-prefixed default: pattern ["sub", "foo", "*"]. A path
        // shorter than the prefix is not that sub-router's root.
        let route = SubRoute::new("*", "*", noop()).prefixed("foo").prefixed("sub");
        assert!(route.matches(&segs(&["sub", "foo"]), &Method::GET));
        assert!(!route.matches(&segs(&["sub"]), &Method::GET));
        assert!(!route.matches(&segs(&["other", "foo"]), &Method::GET));
    }

    #[test]
    fn empty_pattern_matches_empty_path() {
        let route = SubRoute::new("/", "*", noop());
        assert!(route.matches(&segs(&[]), &Method::GET));
        assert!(!route.matches(&segs(&["x"]), &Method::GET));
    }

    #[test]
    fn prefixed_shifts_glob_and_keeps_default() {
        let route = SubRoute::new("/file/*", "GET", noop());
        assert_eq!(route.glob_index(), Some(1));
        let prefixed = route.prefixed("misc");
        assert_eq!(prefixed.glob_index(), Some(2));
        assert!(!prefixed.is_default());
        assert!(prefixed.matches(&segs(&["misc", "file", "a.png"]), &Method::GET));

        let fallback = SubRoute::new("*", "*", noop()).prefixed("misc");
        assert_eq!(fallback.glob_index(), Some(1));
        assert!(fallback.is_default());
    }

    #[test]
    fn prefixed_route_without_glob_keeps_none() {
        let route = SubRoute::new("/code/:code", "*", noop()).prefixed("misc");
        assert_eq!(route.glob_index(), None);
        assert!(route.matches(&segs(&["misc", "code", "200"]), &Method::GET));
    }

    #[test]
    fn prefix_participates_in_matching_but_not_binding() {
        let route = SubRoute::new("/code/:code", "*", noop()).prefixed("misc");
        let path = segs(&["misc", "code", "200"]);
        assert!(route.matches(&path, &Method::GET));
        let params = route.route_params(&path);
        assert_eq!(params.get("code"), Some(&"200".to_owned()));
        assert_eq!(params.len(), 1);
    }
}
