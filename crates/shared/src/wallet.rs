//! Wallet capability and the chain-switch adapter.
//!
//! A wallet is anything that answers EIP-1193 style `request(method, params)` calls.
//! It is always passed in explicitly; `None` means no wallet is installed.
//!
//! See: <https://eips.ethereum.org/EIPS/eip-1193>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::chains::ChainDescriptor;
use crate::error::WalletError;
use crate::jsonrpc::{Request, Response};

#[async_trait]
pub trait Wallet: Send + Sync {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError>;
}

/// How `switch_to_chain` got the wallet onto the target network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// The wallet already knew the network and switched to it.
    Switched,
    /// The wallet did not know the network; it was added. Wallets usually switch on
    /// add, but nothing here re-issues the switch, so callers should confirm.
    Added,
}

/// Asks the wallet to make `chain` its active network.
///
/// Tries `wallet_switchEthereumChain` first. If the wallet reports the network as
/// unrecognized (code 4902), sends exactly one `wallet_addEthereumChain` with the full
/// descriptor. Every other error is returned as-is, without retry.
pub async fn switch_to_chain(
    wallet: Option<&dyn Wallet>,
    chain: &ChainDescriptor,
) -> Result<SwitchOutcome, WalletError> {
    let wallet = wallet.ok_or(WalletError::NoWallet)?;

    let switch = wallet
        .request(
            "wallet_switchEthereumChain",
            json!([{ "chainId": chain.chain_id_hex }]),
        )
        .await;

    match switch {
        Ok(_) => {
            tracing::info!(chain = chain.name, chain_id = chain.chain_id, outcome = "switched");
            Ok(SwitchOutcome::Switched)
        }
        Err(e) if e.is_unrecognized_chain() => {
            tracing::info!(
                chain = chain.name,
                chain_id = chain.chain_id,
                "wallet does not know chain, adding it"
            );
            wallet
                .request("wallet_addEthereumChain", json!([chain.add_chain_params()]))
                .await?;
            tracing::info!(chain = chain.name, chain_id = chain.chain_id, outcome = "added");
            Ok(SwitchOutcome::Added)
        }
        Err(e) => {
            tracing::warn!(
                chain = chain.name,
                chain_id = chain.chain_id,
                outcome = "error",
                error = %e,
                "wallet refused chain switch"
            );
            Err(e)
        }
    }
}

/// Wallet reached over HTTP JSON-RPC, e.g. a desktop wallet's local provider endpoint.
///
/// JSON-RPC error objects become `WalletError::Rejected` with the wallet's own code.
#[derive(Debug, Clone)]
pub struct HttpWallet {
    client: Client,
    url: String,
}

impl HttpWallet {
    pub fn try_new(url: impl Into<String>, timeout: Duration) -> Result<Self, WalletError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WalletError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl Wallet for HttpWallet {
    async fn request(&self, method: &str, params: Value) -> Result<Value, WalletError> {
        let resp = self
            .client
            .post(&self.url)
            .json(&Request::new(method, params))
            .send()
            .await
            .map_err(|e| WalletError::Transport(e.to_string()))?;

        // wallets report provider errors inside the JSON-RPC body, sometimes with a non-2xx status
        let status = resp.status();
        let body = resp.json::<Response>().await.map_err(|e| {
            WalletError::InvalidResponse(format!("{method} returned {status}: {e}"))
        })?;

        if let Some(err) = body.error {
            return Err(WalletError::Rejected {
                code: err.code,
                message: err.message,
            });
        }

        // `wallet_switchEthereumChain` and friends answer with `"result": null`, which still
        // counts as an answer; an envelope with neither field confirms nothing
        body.result.ok_or_else(|| {
            WalletError::InvalidResponse(format!("{method} returned neither result nor error"))
        })
    }
}
