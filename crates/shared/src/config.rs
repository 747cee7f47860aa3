//! Runtime settings read from environment variables.
//!
//! - `PORT`: HTTP listen port (default: 8080)
//! - `RPC_TIMEOUT_SECS`: per-request timeout for node and wallet calls (default: 5)
//!
//! Unparseable values fall back to the defaults.

use std::env;
use std::time::Duration;

use crate::rpc::DEFAULT_RPC_TIMEOUT;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub port: u16,
    pub rpc_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let rpc_timeout = lookup("RPC_TIMEOUT_SECS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_RPC_TIMEOUT);

        Self { port, rpc_timeout }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
