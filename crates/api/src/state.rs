//! Shared application state for the axum server.
//!
//! Holds the resolver only. Gas prices are fetched fresh on every request and never cached.

use std::sync::Arc;

use cheapchain_shared::resolver::Resolver;
use cheapchain_shared::rpc::GasPriceSource;

/// Shared state passed to all axum handlers via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
}

impl AppState {
    pub fn new(source: Arc<dyn GasPriceSource>) -> Self {
        Self {
            resolver: Resolver::new(source),
        }
    }
}
