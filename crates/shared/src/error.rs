//! Application error types with HTTP status codes and JSON error responses.
//!
//! `AppError` maps each variant to a specific HTTP status code and machine-readable
//! error code. `WalletError` covers the wallet adapter and is wrapped by `AppError`
//! when it has to cross the HTTP boundary.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// JSON-RPC error code a wallet returns when it does not know the requested chain.
///
/// See: <https://docs.metamask.io/wallet/reference/json-rpc-methods/wallet_switchethereumchain/>
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

/// Unified error type for the library and the API.
///
/// Implements `IntoResponse` so handlers can return `Result<_, AppError>` directly.
/// The JSON response shape is `{ "error": { "code": "...", "message": "..." } }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("chain {0} not found")]
    ChainNotFound(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error(transparent)]
    Wallet(#[from] WalletError),
}

impl AppError {
    /// Returns the machine-readable error code (e.g. "CHAIN_NOT_FOUND").
    pub fn code(&self) -> &'static str {
        match self {
            Self::ChainNotFound(_) => "CHAIN_NOT_FOUND",
            Self::Rpc(_) => "RPC_ERROR",
            Self::InvalidQuantity(_) => "INVALID_QUANTITY",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::Wallet(e) => e.code(),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::ChainNotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidAmount(_) => StatusCode::BAD_REQUEST,
            Self::Rpc(_) | Self::InvalidQuantity(_) => StatusCode::BAD_GATEWAY,
            Self::Wallet(WalletError::NoWallet) => StatusCode::PRECONDITION_FAILED,
            Self::Wallet(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        });
        (status, axum::Json(body)).into_response()
    }
}

/// Failures of the wallet adapter.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// No wallet capability was provided. Reported before any request is made.
    #[error("no wallet available")]
    NoWallet,

    /// The wallet answered with an EIP-1193 provider error.
    #[error("wallet rejected request ({code}): {message}")]
    Rejected { code: i64, message: String },

    #[error("wallet transport error: {0}")]
    Transport(String),

    #[error("invalid wallet response: {0}")]
    InvalidResponse(String),

    /// A network was added but the wallet did not make it the active one.
    #[error("wallet is on chain {actual}, expected {expected}")]
    ChainMismatch { expected: String, actual: String },
}

impl WalletError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoWallet => "NO_WALLET",
            Self::Rejected { .. } => "WALLET_REJECTED",
            Self::Transport(_) => "WALLET_TRANSPORT_ERROR",
            Self::InvalidResponse(_) => "WALLET_INVALID_RESPONSE",
            Self::ChainMismatch { .. } => "WALLET_CHAIN_MISMATCH",
        }
    }

    /// True for the provider error meaning "network not recognized by wallet".
    pub fn is_unrecognized_chain(&self) -> bool {
        matches!(self, Self::Rejected { code, .. } if *code == UNRECOGNIZED_CHAIN_CODE)
    }
}
