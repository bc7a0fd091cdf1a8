//! # portico-gateway
//!
//! A minimal HTTP application gateway. The first path segment of every
//! request selects an independently-registered application; each
//! application's sub-router matches the remaining segments against a
//! small pattern language of literals, `:name` parameters, and a
//! trailing `*` wildcard.
//!
//! ## Architecture
//!
//! ```text
//! HTTP clients
//!     │
//!     ├── Axum fallback handler (gateway/)
//!     │       └── Dispatcher: first segment → App
//!     │
//!     ├── App / RouterApp (gateway/)
//!     │       └── SubRouter: first-match-wins linear scan (routing/)
//!     │
//!     ├── RequestArgs: route + query + JSON body (routing/)
//!     │
//!     └── RouteHandler::Data | RouteHandler::Raw
//! ```
//!
//! Routing is fully data-driven: routes are registered in code at
//! startup, in the order they should be tried, and never mutated while
//! serving.

pub mod app_state;
pub mod apps;
pub mod config;
pub mod error;
pub mod gateway;
pub mod routing;
