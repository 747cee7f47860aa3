//! Cheapchain API server.
//!
//! Finds the test network with the cheapest native transfer right now and serves the
//! chain data a browser wallet needs to switch to it. Every quote is fetched live.
//!
//! Environment variables:
//! - `PORT`: HTTP listen port (default: 8080)
//! - `RPC_TIMEOUT_SECS`: per-request RPC timeout in seconds (default: 5)
//! - `RUST_LOG`: tracing env filter (default: info)

mod routes;
mod state;

use std::sync::Arc;

use axum::http::Method;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use cheapchain_shared::chains::CHAINS;
use cheapchain_shared::config::Settings;
use cheapchain_shared::rpc::RpcClient;

use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cheapchain API",
        description = "Cheapest-chain lookup for native transfers across EVM test networks",
        version = "1.0.0",
        license(name = "MIT")
    ),
    tags(
        (name = "Chains", description = "Chain information endpoints"),
        (name = "Quotes", description = "Gas price and transfer cost endpoints")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let settings = Settings::from_env();
    let rpc_client = RpcClient::try_new(settings.rpc_timeout).expect("failed to build RPC client");
    let state = AppState::new(Arc::new(rpc_client));

    tracing::info!(
        chains = CHAINS.len(),
        rpc_timeout_secs = settings.rpc_timeout.as_secs(),
        "resolver ready"
    );

    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(Any);

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(routes::chains::list_chains))
        .routes(routes!(routes::chains::get_chain))
        .routes(routes!(routes::chains::get_wallet_params))
        .routes(routes!(routes::quotes::cheapest_chain))
        .routes(routes!(routes::quotes::gas_quotes))
        .with_state(state)
        .split_for_parts();

    let app = router
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", api))
        .route("/health", get(|| async { "ok" }))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", settings.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = settings.port, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await
        .expect("server error");
}
