//! Ordered route collection and request dispatch for one application.
//!
//! Registration order is the router's contract with its caller: the
//! first registered route whose pattern matches wins, with no
//! specificity ranking. A catch-all registered early therefore shadows
//! everything registered after it — that is the caller's responsibility,
//! not something the router corrects.

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::error::GatewayError;

use super::args::{RequestArgs, decode_body, query_params};
use super::route::{RouteHandler, SubRoute};

/// Reserved key in a data handler's returned object: its integer value
/// becomes the response status code and the key is stripped from the
/// body.
pub const STATUS_CODE_KEY: &str = "HTTPStatusCode";

/// An ordered collection of routes for one application.
///
/// Built once at application construction time and never mutated while
/// serving, so concurrent request handling needs no locking.
#[derive(Debug, Clone, Default)]
pub struct SubRouter {
    routes: Vec<SubRoute>,
}

impl SubRouter {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registers a route. The template follows the same segment syntax
    /// as request paths: literals, `:name` parameters, and `*`.
    pub fn register(&mut self, template: &str, method: &str, handler: RouteHandler) {
        self.routes.push(SubRoute::new(template, method, handler));
    }

    /// Mounts an existing route collection under a prefix segment.
    ///
    /// Every pattern gains the prefix as its first literal, cached glob
    /// indices shift accordingly, and default routes stay default — so a
    /// nested router's `*` fallback also catches a bare request to the
    /// prefix itself.
    pub fn add_sub_routes(&mut self, prefix: &str, routes: Vec<SubRoute>) {
        self.routes
            .extend(routes.into_iter().map(|route| route.prefixed(prefix)));
    }

    /// Consumes the router, yielding its routes for composition into
    /// another router via [`Self::add_sub_routes`].
    #[must_use]
    pub fn into_routes(self) -> Vec<SubRoute> {
        self.routes
    }

    /// Returns the registered routes in registration order.
    #[must_use]
    pub fn routes(&self) -> &[SubRoute] {
        &self.routes
    }

    /// Resolves `path` to the first matching route and invokes it.
    ///
    /// Arguments are assembled only after a match, so unmatched requests
    /// never touch the body stream. A raw handler's response is returned
    /// verbatim; a data handler's value goes through the status-code and
    /// serialization protocol. No match yields a 404.
    pub async fn handle(&self, req: Request<Body>, path: &[String]) -> Response {
        let Some(route) = self
            .routes
            .iter()
            .find(|route| route.matches(path, req.method()))
        else {
            return GatewayError::RouteNotFound.into_response();
        };

        let (parts, body) = req.into_parts();
        // The body-limit layer at the gateway edge caps the size.
        let bytes = match to_bytes(body, usize::MAX).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(%err, "failed to read request body");
                return GatewayError::Internal("failed to read request body".to_owned())
                    .into_response();
            }
        };

        let args = RequestArgs {
            route: route.route_params(path),
            query: query_params(parts.uri.query()),
            body: decode_body(&bytes),
        };

        match route.handler() {
            RouteHandler::Raw(handler) => handler(parts, args).await,
            RouteHandler::Data(handler) => data_response(handler(args).await),
        }
    }
}

/// Applies the data-handler response protocol: strip and apply the
/// reserved status-code key, then serialize the remaining value as JSON.
fn data_response(mut value: Value) -> Response {
    let mut status = StatusCode::OK;

    if let Some(object) = value.as_object_mut()
        && let Some(code) = object.remove(STATUS_CODE_KEY)
    {
        let parsed = code
            .as_i64()
            .and_then(|raw| u16::try_from(raw).ok())
            .and_then(|raw| StatusCode::from_u16(raw).ok());
        match parsed {
            Some(parsed) => status = parsed,
            None => {
                tracing::error!(?code, "handler returned an unusable {STATUS_CODE_KEY}");
                return GatewayError::InvalidStatusCode(code.to_string()).into_response();
            }
        }
    }

    match serde_json::to_vec(&value) {
        Ok(body) => (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(err) => {
            tracing::error!(%err, "failed to encode handler response");
            GatewayError::ResponseEncoding(err.to_string()).into_response()
        }
    }
}
