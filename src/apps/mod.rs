//! Built-in applications compiled into the gateway binary.
//!
//! The gateway's applications register themselves into the dispatcher at
//! startup, before the listener accepts connections.

pub mod demo;

use std::sync::Arc;

use crate::config::GatewayConfig;
use crate::gateway::App;

/// Constructs every built-in application from the gateway configuration.
#[must_use]
pub fn builtin_apps(config: &GatewayConfig) -> Vec<Arc<dyn App>> {
    vec![Arc::new(demo::misc_app(config.files_dir.clone()))]
}
