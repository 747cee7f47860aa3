//! API response types with serde serialization and OpenAPI schema generation.
//!
//! All response types use `camelCase` field names for the JSON wire format. Wei amounts
//! are decimal strings so clients never lose precision.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::chains::ChainDescriptor;
use crate::donation::{format_ether, DONATION_ADDRESS};
use crate::resolver::{ChainQuoteOutcome, GasQuote};

/// Response for chain information endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainResponse {
    /// Human-readable network name.
    pub name: &'static str,
    /// EIP-155 chain ID.
    pub chain_id: u64,
    /// Chain ID as a `0x`-prefixed hex string.
    pub chain_id_hex: &'static str,
    /// Ticker of the native asset.
    pub native_symbol: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_explorer_url: Option<&'static str>,
}

impl From<&'static ChainDescriptor> for ChainResponse {
    fn from(c: &'static ChainDescriptor) -> Self {
        Self {
            name: c.name,
            chain_id: c.chain_id,
            chain_id_hex: c.chain_id_hex,
            native_symbol: c.native_symbol,
            block_explorer_url: c.block_explorer_url,
        }
    }
}

/// A single chain's transfer cost estimate.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub chain: ChainResponse,
    /// Gas price in wei, decimal string.
    pub gas_price: String,
    /// Gas price times the 21000 transfer gas limit, in wei, decimal string.
    pub estimated_cost: String,
    /// `estimatedCost` in whole native units (e.g. "0.000021").
    pub estimated_cost_ether: String,
    /// Destination of donations on every chain.
    pub donation_address: &'static str,
}

impl From<GasQuote<'static>> for QuoteResponse {
    fn from(q: GasQuote<'static>) -> Self {
        Self {
            chain: q.chain.into(),
            gas_price: q.gas_price.to_string(),
            estimated_cost_ether: format_ether(&q.estimated_cost),
            estimated_cost: q.estimated_cost.to_string(),
            donation_address: DONATION_ADDRESS,
        }
    }
}

/// Response for the cheapest-chain endpoint.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheapestChainResponse {
    /// The cheapest chain, or `null` if no chain answered. Retry later in that case.
    pub quote: Option<QuoteResponse>,
    /// When the chains were queried.
    pub quoted_at: DateTime<Utc>,
}

/// One chain's entry in the all-quotes listing. Exactly one of `quote` and `error` is set.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChainQuoteResponse {
    pub chain: ChainResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<QuoteResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ChainQuoteOutcome<'static>> for ChainQuoteResponse {
    fn from(o: ChainQuoteOutcome<'static>) -> Self {
        let (quote, error) = match o.result {
            Ok(q) => (Some(q.into()), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            chain: o.chain.into(),
            quote,
            error,
        }
    }
}

/// Top-level error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail with machine-readable code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g. "CHAIN_NOT_FOUND").
    pub code: String,
    /// Human-readable error description.
    pub message: String,
}
