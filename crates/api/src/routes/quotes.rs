//! Gas quote endpoints.
//!
//! Every request fans out to all registered chains. A chain whose RPC endpoint fails is
//! skipped; when none answer, the cheapest-chain response carries `quote: null` with a
//! 200 status, since that is an expected "try again later" outcome rather than a fault.

use axum::extract::State;
use axum::Json;
use chrono::Utc;

use cheapchain_shared::chains::CHAINS;
use cheapchain_shared::models::{ChainQuoteResponse, CheapestChainResponse, QuoteResponse};

use crate::state::AppState;

/// Returns the chain with the lowest estimated cost for a plain native transfer.
#[utoipa::path(
    get,
    path = "/v1/cheapest-chain",
    tag = "Quotes",
    summary = "Find the cheapest chain for a native transfer",
    description = "Queries every supported chain for its gas price and returns the one with \
                   the lowest 21000-gas transfer cost. Ties go to the chain listed first.",
    responses(
        (status = 200, description = "Cheapest chain, or a null quote if nothing answered",
         body = CheapestChainResponse)
    )
)]
pub async fn cheapest_chain(State(state): State<AppState>) -> Json<CheapestChainResponse> {
    let quoted_at = Utc::now();
    let quote = state.resolver.cheapest_chain().await.map(QuoteResponse::from);

    Json(CheapestChainResponse { quote, quoted_at })
}

/// Returns every chain's current quote or failure, in registry order.
#[utoipa::path(
    get,
    path = "/v1/gas-quotes",
    tag = "Quotes",
    summary = "List gas quotes for all chains",
    responses(
        (status = 200, description = "Per-chain quotes", body = Vec<ChainQuoteResponse>)
    )
)]
pub async fn gas_quotes(State(state): State<AppState>) -> Json<Vec<ChainQuoteResponse>> {
    let outcomes = state.resolver.quote_all(CHAINS).await;
    Json(outcomes.into_iter().map(ChainQuoteResponse::from).collect())
}
