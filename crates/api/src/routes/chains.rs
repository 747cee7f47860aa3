//! Chain information endpoints.
//!
//! These handlers serve static registry data. No RPC calls are made since all chain
//! info is compiled into the binary.

use axum::extract::Path;
use axum::Json;

use cheapchain_shared::chains::{self, AddChainParams, CHAINS};
use cheapchain_shared::error::AppError;
use cheapchain_shared::models::ChainResponse;

/// Returns all supported chains in registry order.
#[utoipa::path(
    get,
    path = "/v1/chains",
    tag = "Chains",
    summary = "List all supported chains",
    responses(
        (status = 200, description = "List of chains", body = Vec<ChainResponse>)
    )
)]
pub async fn list_chains() -> Json<Vec<ChainResponse>> {
    Json(CHAINS.iter().map(ChainResponse::from).collect())
}

/// Returns details for a single chain by its EIP-155 chain ID.
#[utoipa::path(
    get,
    path = "/v1/chains/{chain_id}",
    tag = "Chains",
    summary = "Get a chain by ID",
    params(
        ("chain_id" = u64, Path, description = "The chain ID (e.g. 97 for BSC Testnet)")
    ),
    responses(
        (status = 200, description = "Chain details", body = ChainResponse),
        (status = 404, description = "Chain not found", body = cheapchain_shared::models::ErrorBody)
    )
)]
pub async fn get_chain(Path(chain_id): Path<u64>) -> Result<Json<ChainResponse>, AppError> {
    let chain = chains::chain_by_id(chain_id)
        .ok_or_else(|| AppError::ChainNotFound(chain_id.to_string()))?;

    Ok(Json(chain.into()))
}

/// Returns the descriptor a browser wallet needs for `wallet_addEthereumChain`.
#[utoipa::path(
    get,
    path = "/v1/chains/{chain_id}/wallet-params",
    tag = "Chains",
    summary = "Get wallet registration parameters for a chain",
    params(
        ("chain_id" = u64, Path, description = "The chain ID (e.g. 97 for BSC Testnet)")
    ),
    responses(
        (status = 200, description = "EIP-3085 chain parameters", body = AddChainParams),
        (status = 404, description = "Chain not found", body = cheapchain_shared::models::ErrorBody)
    )
)]
pub async fn get_wallet_params(
    Path(chain_id): Path<u64>,
) -> Result<Json<AddChainParams>, AppError> {
    let chain = chains::chain_by_id(chain_id)
        .ok_or_else(|| AppError::ChainNotFound(chain_id.to_string()))?;

    Ok(Json(chain.add_chain_params()))
}
