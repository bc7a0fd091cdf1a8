//! Request routing core: path normalization, argument extraction, route
//! matching, and per-application dispatch.
//!
//! A [`SubRouter`] holds the ordered routes of one application. Each
//! [`SubRoute`] matches a path template of literal segments, `:name`
//! parameters, and a trailing `*` wildcard; the first registered match
//! wins. Matched handlers receive a [`RequestArgs`] bundle of route
//! parameters, query parameters, and the decoded JSON body.

pub mod args;
pub mod path;
pub mod route;
pub mod router;

pub use args::RequestArgs;
pub use path::normalize;
pub use route::{MethodFilter, RouteHandler, Segment, SubRoute};
pub use router::SubRouter;
