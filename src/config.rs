//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). Only process-level knobs live here;
//! routes and applications are registered in code.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:2000`).
    pub listen_addr: SocketAddr,

    /// File served for the browser's automatic `/favicon.ico` request.
    pub favicon_path: PathBuf,

    /// Directory the built-in demo application serves files from.
    pub files_dir: PathBuf,

    /// Maximum accepted request body size in bytes, enforced at the
    /// gateway edge.
    pub body_max_bytes: usize,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as
    /// a [`SocketAddr`].
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:2000".to_string())
            .parse()
            .context("LISTEN_ADDR is not a valid socket address")?;

        let favicon_path =
            PathBuf::from(std::env::var("FAVICON_PATH").unwrap_or_else(|_| "./favicon.ico".to_string()));

        let files_dir =
            PathBuf::from(std::env::var("FILES_DIR").unwrap_or_else(|_| "./files".to_string()));

        let body_max_bytes = parse_env("BODY_MAX_BYTES", 1_048_576);

        Ok(Self {
            listen_addr,
            favicon_path,
            files_dir,
            body_max_bytes,
        })
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
