//! Top-level request dispatch: first path segment to application.
//!
//! The [`Dispatcher`] holds a read-only mapping from application name to
//! entry point. It is built once at startup, wrapped in an `Arc`, and
//! never mutated while serving, so concurrent lookups need no locking.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode, header};
use axum::response::{IntoResponse, Response};

use crate::app_state::AppState;
use crate::error::GatewayError;
use crate::gateway::app::App;
use crate::routing::normalize;

/// Reserved first segment for the browser's automatic favicon request.
const FAVICON_SEGMENT: &str = "favicon.ico";

/// Process-wide mapping from application name to application entry point.
///
/// Lookup is exact-string and one level deep: the first path segment
/// selects the application, the remaining segments are handed to it. No
/// retry, no redirect, no alternate resolution.
#[derive(Debug)]
pub struct Dispatcher {
    apps: HashMap<String, Arc<dyn App>>,
    favicon_path: PathBuf,
}

impl Dispatcher {
    /// Creates a dispatcher with no registered applications.
    #[must_use]
    pub fn new(favicon_path: PathBuf) -> Self {
        Self {
            apps: HashMap::new(),
            favicon_path,
        }
    }

    /// Registers an application under its own name.
    ///
    /// Duplicate names are not an error at this layer: the last
    /// registration wins, with a warning.
    pub fn register(&mut self, app: Arc<dyn App>) {
        let name = app.name().to_owned();
        if self.apps.insert(name.clone(), app).is_some() {
            tracing::warn!(app = %name, "replacing previously registered application");
        }
    }

    /// Returns the number of registered applications.
    #[must_use]
    pub fn len(&self) -> usize {
        self.apps.len()
    }

    /// Returns `true` if no applications are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }

    /// Returns the registered application names.
    pub fn app_names(&self) -> impl Iterator<Item = &str> {
        self.apps.keys().map(String::as_str)
    }

    /// Routes one inbound request.
    ///
    /// The empty path is handled here as "home"; `favicon.ico` is served
    /// from the configured file as a legacy browser convenience; anything
    /// else resolves its first segment against the application mapping.
    pub async fn dispatch(&self, req: Request<Body>) -> Response {
        let path = normalize(req.uri().path());

        let Some((first, rest)) = path.split_first() else {
            // Placeholder; a real home page is an extension point, not
            // gateway logic.
            return (StatusCode::OK, "home").into_response();
        };

        if first.as_str() == FAVICON_SEGMENT {
            return self.serve_favicon().await;
        }

        match self.apps.get(first) {
            Some(app) => app.handle(req, rest.to_vec()).await,
            None => GatewayError::AppNotFound(first.clone()).into_response(),
        }
    }

    async fn serve_favicon(&self) -> Response {
        match tokio::fs::read(&self.favicon_path).await {
            Ok(bytes) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "image/x-icon")],
                bytes,
            )
                .into_response(),
            Err(err) => {
                tracing::debug!(%err, path = %self.favicon_path.display(), "favicon not available");
                StatusCode::NOT_FOUND.into_response()
            }
        }
    }
}

/// Axum fallback handler: hands every request to the dispatcher.
///
/// Installed as the router's `fallback` so the whole HTTP surface is
/// data-driven by the registered applications.
pub async fn dispatch_handler(State(state): State<AppState>, req: Request<Body>) -> Response {
    state.dispatcher.dispatch(req).await
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::gateway::app::RouterApp;
    use crate::routing::{RouteHandler, SubRouter};
    use axum::body::to_bytes;
    use serde_json::{Value, json};

    fn request(uri: &str) -> Request<Body> {
        let Ok(req) = Request::builder().uri(uri).body(Body::empty()) else {
            panic!("valid test request");
        };
        req
    }

    fn misc_app() -> Arc<dyn App> {
        let mut router = SubRouter::new();
        router.register("/code/:code", "*", RouteHandler::data(|args| async move {
            json!({"code": args.route.get("code")})
        }));
        Arc::new(RouterApp::new("misc", router))
    }

    async fn body_json(response: Response) -> Value {
        let Ok(bytes) = to_bytes(response.into_body(), 1 << 20).await else {
            panic!("readable response body");
        };
        let Ok(value) = serde_json::from_slice(&bytes) else {
            panic!("JSON response body");
        };
        value
    }

    #[tokio::test]
    async fn empty_path_is_home() {
        let dispatcher = Dispatcher::new(PathBuf::from("./favicon.ico"));
        let response = dispatcher.dispatch(request("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_first_segment_is_404() {
        let dispatcher = Dispatcher::new(PathBuf::from("./favicon.ico"));
        let response = dispatcher.dispatch(request("/nope/whatever")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn known_app_receives_remaining_segments() {
        let mut dispatcher = Dispatcher::new(PathBuf::from("./favicon.ico"));
        dispatcher.register(misc_app());

        let response = dispatcher.dispatch(request("/misc/code/200")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"code": "200"}));
    }

    #[tokio::test]
    async fn repeated_slashes_resolve_the_same_app() {
        let mut dispatcher = Dispatcher::new(PathBuf::from("./favicon.ico"));
        dispatcher.register(misc_app());

        let response = dispatcher.dispatch(request("//misc//code//200/")).await;
        assert_eq!(body_json(response).await, json!({"code": "200"}));
    }

    #[tokio::test]
    async fn duplicate_registration_last_wins() {
        let mut first = SubRouter::new();
        first.register("*", "*", RouteHandler::data(|_args| async {
            json!({"app": "first"})
        }));
        let mut second = SubRouter::new();
        second.register("*", "*", RouteHandler::data(|_args| async {
            json!({"app": "second"})
        }));

        let mut dispatcher = Dispatcher::new(PathBuf::from("./favicon.ico"));
        dispatcher.register(Arc::new(RouterApp::new("dup", first)));
        dispatcher.register(Arc::new(RouterApp::new("dup", second)));
        assert_eq!(dispatcher.len(), 1);

        let response = dispatcher.dispatch(request("/dup/anything")).await;
        assert_eq!(body_json(response).await, json!({"app": "second"}));
    }

    #[test]
    fn registry_reports_registered_names() {
        let mut dispatcher = Dispatcher::new(PathBuf::from("./favicon.ico"));
        assert!(dispatcher.is_empty());

        dispatcher.register(misc_app());
        assert!(!dispatcher.is_empty());
        let names: Vec<&str> = dispatcher.app_names().collect();
        assert_eq!(names, vec!["misc"]);
    }

    #[tokio::test]
    async fn missing_favicon_is_404() {
        let dispatcher = Dispatcher::new(PathBuf::from("./definitely-not-here.ico"));
        let response = dispatcher.dispatch(request("/favicon.ico")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
