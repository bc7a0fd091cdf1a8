//! The built-in `misc` demo application.
//!
//! Exercises every handler convention the gateway supports: raw handlers
//! serving files, a data handler using the `HTTPStatusCode` protocol, a
//! composed sub-area, and a JSON 404 fallback registered last.

use std::path::{Path, PathBuf};

use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::gateway::RouterApp;
use crate::routing::{RequestArgs, RouteHandler, SubRouter, normalize};

/// Builds the `misc` application, serving files from `files_dir`.
///
/// Routes, in registration order:
/// - `GET /misc/file/*` — serves the wildcard remainder from `files_dir`
/// - `GET /misc/foo` — serves one exact file
/// - `ANY /misc/code/:code` — echoes the requested status code
/// - `ANY /misc/echo/*` — composed sub-area echoing the argument bundle
/// - `ANY /misc/*` — JSON 404 fallback (registered last on purpose)
#[must_use]
pub fn misc_app(files_dir: PathBuf) -> RouterApp {
    let mut router = SubRouter::new();

    let dir = files_dir.clone();
    router.register("/file/*", "GET", RouteHandler::raw(move |parts, _args| {
        let dir = dir.clone();
        async move { serve_wildcard_file(&dir, &parts).await }
    }));

    let dir = files_dir;
    router.register("/foo", "GET", RouteHandler::raw(move |_parts, _args| {
        let dir = dir.clone();
        async move { serve_file(&dir.join("hello.html")).await }
    }));

    router.register("/code/:code", "*", RouteHandler::data(|args| async move {
        status_echo(&args)
    }));

    let mut echo = SubRouter::new();
    echo.register("*", "*", RouteHandler::data(|args| async move {
        json!({
            "route": args.route,
            "query": args.query,
            "body": args.body,
        })
    }));
    router.add_sub_routes("echo", echo.into_routes());

    router.register("*", "*", RouteHandler::data(|_args| async {
        json!({
            "HTTPStatusCode": 404,
            "something": "this is a 404 message as json instead of a file",
        })
    }));

    RouterApp::new("misc", router)
}

/// Echoes the `:code` route parameter back as the response status.
fn status_echo(args: &RequestArgs) -> serde_json::Value {
    match args.route.get("code").map(|raw| raw.parse::<u16>()) {
        Some(Ok(code)) => json!({
            "HTTPStatusCode": code,
            "status": "testing status code",
        }),
        Some(Err(err)) => json!({
            "HTTPStatusCode": 500,
            "status": err.to_string(),
        }),
        None => json!({
            "HTTPStatusCode": 500,
            "status": "missing code parameter",
        }),
    }
}

/// Serves the path remainder after `/misc/file/` from the files directory.
async fn serve_wildcard_file(dir: &Path, parts: &Parts) -> Response {
    let segments = normalize(parts.uri.path());
    // Skip the application name and the "file" literal.
    let relative = segments.get(2..).unwrap_or(&[]);
    if relative.is_empty() || relative.iter().any(|segment| segment == "..") {
        return StatusCode::NOT_FOUND.into_response();
    }

    let mut target = dir.to_path_buf();
    for segment in relative {
        target.push(segment);
    }
    serve_file(&target).await
}

/// Reads and serves one file, guessing the content type from its extension.
async fn serve_file(path: &Path) -> Response {
    match tokio::fs::read(path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for(path))],
            bytes,
        )
            .into_response(),
        Err(err) => {
            tracing::debug!(%err, path = %path.display(), "file not available");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        Some("json") => "application/json",
        Some("txt") => "text/plain; charset=utf-8",
        Some("png") => "image/png",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        _ => "application/octet-stream",
    }
}
