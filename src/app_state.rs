//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::gateway::Dispatcher;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// The dispatcher is fully constructed before the listener accepts
/// connections and is read-only afterwards.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The gateway dispatcher holding all registered applications.
    pub dispatcher: Arc<Dispatcher>,
}
