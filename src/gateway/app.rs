//! The application contract between the gateway and its sub-applications.
//!
//! An application is registered under one top-level path segment and
//! receives every request whose first segment equals its name, along
//! with the remaining path segments. Applications are constructed and
//! registered at startup, before the listener accepts connections.

use std::fmt;
use std::sync::Arc;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use futures_util::future::BoxFuture;

use crate::routing::SubRouter;

/// A sub-application mounted under one top-level path segment.
///
/// The gateway dispatcher calls [`App::handle`] with the request and the
/// path segments *after* the application name: a request for
/// `/misc/code/200` reaches the `misc` application with
/// `["code", "200"]`.
pub trait App: Send + Sync + fmt::Debug {
    /// The top-level path segment this application is served under.
    fn name(&self) -> &str;

    /// Handles one request. The application owns the entire response.
    fn handle(&self, req: Request<Body>, path: Vec<String>) -> BoxFuture<'static, Response>;
}

/// The common [`App`] implementation: a named application backed by a
/// [`SubRouter`].
///
/// Most applications only need pattern-matched routes; this wrapper
/// delegates every request to the router's dispatch. Applications with
/// non-router needs implement [`App`] directly.
#[derive(Debug)]
pub struct RouterApp {
    name: String,
    router: Arc<SubRouter>,
}

impl RouterApp {
    /// Wraps a fully-registered router as an application.
    #[must_use]
    pub fn new(name: impl Into<String>, router: SubRouter) -> Self {
        Self {
            name: name.into(),
            router: Arc::new(router),
        }
    }

    /// Returns the application's router.
    #[must_use]
    pub fn router(&self) -> &SubRouter {
        &self.router
    }
}

impl App for RouterApp {
    fn name(&self) -> &str {
        &self.name
    }

    fn handle(&self, req: Request<Body>, path: Vec<String>) -> BoxFuture<'static, Response> {
        let router = Arc::clone(&self.router);
        Box::pin(async move { router.handle(req, &path).await })
    }
}
