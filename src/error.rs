//! Gateway error types with HTTP status code mapping.
//!
//! [`GatewayError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.
//! Every failure here is per-request and isolated; nothing is fatal to the
//! process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2002,
///     "message": "no registered route matches the request",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`GatewayError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Server-side error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category          | HTTP Status               |
/// |-----------|-------------------|---------------------------|
/// | 2000–2999 | Not Found         | 404 Not Found             |
/// | 3000–3999 | Server / Protocol | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// No application is registered under the requested top-level segment.
    #[error("no application registered as '{0}'")]
    AppNotFound(String),

    /// No route in the application's sub-router matched the request.
    #[error("no registered route matches the request")]
    RouteNotFound,

    /// A data handler returned an `HTTPStatusCode` that is not a usable
    /// integer status code.
    #[error("handler returned an invalid status code: {0}")]
    InvalidStatusCode(String),

    /// A data handler's returned value could not be serialized to JSON.
    #[error("failed to encode response: {0}")]
    ResponseEncoding(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::AppNotFound(_) => 2001,
            Self::RouteNotFound => 2002,
            Self::InvalidStatusCode(_) => 3001,
            Self::ResponseEncoding(_) => 3002,
            Self::Internal(_) => 3000,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::AppNotFound(_) | Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::InvalidStatusCode(_) | Self::ResponseEncoding(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
