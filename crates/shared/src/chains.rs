//! Static registry of the EVM test networks a donation can be routed to.
//!
//! All chains are compile-time constants. Lookups by decimal id and by the
//! wallet-facing hex id go through `LazyLock<HashMap>` tables built on first use.
//! The registry order is stable but carries no priority.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Serialize;
use utoipa::ToSchema;

/// Decimals of the native asset on every registered network.
pub const NATIVE_DECIMALS: u8 = 18;

/// Configuration for a single EVM network.
///
/// All fields are `&'static str` or Copy types, so lookups never allocate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainDescriptor {
    /// Human-readable network name (e.g. "Ethereum Sepolia").
    pub name: &'static str,
    /// EIP-155 chain ID.
    pub chain_id: u64,
    /// `chain_id` as a `0x`-prefixed hex string, the form wallets identify networks by.
    pub chain_id_hex: &'static str,
    /// HTTP JSON-RPC endpoint.
    pub rpc_url: &'static str,
    /// Ticker of the native asset, display only.
    pub native_symbol: &'static str,
    pub block_explorer_url: Option<&'static str>,
}

/// Native currency metadata as expected by `wallet_addEthereumChain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NativeCurrency {
    pub name: &'static str,
    pub symbol: &'static str,
    pub decimals: u8,
}

/// Wallet-facing network descriptor, the single parameter of `wallet_addEthereumChain`.
///
/// See: <https://eips.ethereum.org/EIPS/eip-3085>
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddChainParams {
    pub chain_id: &'static str,
    pub chain_name: &'static str,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<&'static str>,
    pub block_explorer_urls: Vec<&'static str>,
}

impl ChainDescriptor {
    /// Builds the descriptor a wallet needs to register this network.
    pub fn add_chain_params(&self) -> AddChainParams {
        AddChainParams {
            chain_id: self.chain_id_hex,
            chain_name: self.name,
            native_currency: NativeCurrency {
                name: self.native_symbol,
                symbol: self.native_symbol,
                decimals: NATIVE_DECIMALS,
            },
            rpc_urls: vec![self.rpc_url],
            block_explorer_urls: self.block_explorer_url.into_iter().collect(),
        }
    }

    /// Explorer link for a transaction hash, if the chain has an explorer.
    pub fn tx_url(&self, tx_hash: &str) -> Option<String> {
        self.block_explorer_url
            .map(|base| format!("{}/tx/{tx_hash}", base.trim_end_matches('/')))
    }
}

/// All supported networks.
pub static CHAINS: &[ChainDescriptor] = &[
    ChainDescriptor {
        name: "Ethereum Sepolia",
        chain_id: 11155111,
        chain_id_hex: "0xaa36a7",
        rpc_url: "https://rpc.sepolia.org",
        native_symbol: "ETH",
        block_explorer_url: Some("https://sepolia.etherscan.io"),
    },
    ChainDescriptor {
        name: "Polygon Amoy",
        chain_id: 80002,
        chain_id_hex: "0x13882",
        rpc_url: "https://rpc-amoy.polygon.technology",
        native_symbol: "POL",
        block_explorer_url: Some("https://amoy.polygonscan.com"),
    },
    ChainDescriptor {
        name: "Fantom Testnet",
        chain_id: 4002,
        chain_id_hex: "0xfa2",
        rpc_url: "https://rpc.testnet.fantom.network/",
        native_symbol: "FTM",
        block_explorer_url: Some("https://testnet.ftmscan.com"),
    },
    ChainDescriptor {
        name: "BSC Testnet",
        chain_id: 97,
        chain_id_hex: "0x61",
        rpc_url: "https://data-seed-prebsc-1-s1.binance.org:8545/",
        native_symbol: "BNB",
        block_explorer_url: Some("https://testnet.bscscan.com"),
    },
    ChainDescriptor {
        name: "Arbitrum Sepolia",
        chain_id: 421614,
        chain_id_hex: "0x66eee",
        rpc_url: "https://sepolia-rollup.arbitrum.io/rpc",
        native_symbol: "ETH",
        block_explorer_url: Some("https://sepolia.arbiscan.io"),
    },
    ChainDescriptor {
        name: "Optimism Sepolia",
        chain_id: 11155420,
        chain_id_hex: "0xaa37dc",
        rpc_url: "https://sepolia.optimism.io",
        native_symbol: "ETH",
        block_explorer_url: Some("https://sepolia-optimism.etherscan.io"),
    },
    ChainDescriptor {
        name: "Base Sepolia",
        chain_id: 84532,
        chain_id_hex: "0x14a34",
        rpc_url: "https://sepolia.base.org",
        native_symbol: "ETH",
        block_explorer_url: Some("https://sepolia.basescan.org"),
    },
];

/// Lookup table from chain_id -> ChainDescriptor, built once on first access.
static CHAIN_BY_ID: LazyLock<HashMap<u64, &'static ChainDescriptor>> =
    LazyLock::new(|| CHAINS.iter().map(|c| (c.chain_id, c)).collect());

/// Lookup table from lowercase hex id -> ChainDescriptor.
static CHAIN_BY_HEX: LazyLock<HashMap<String, &'static ChainDescriptor>> =
    LazyLock::new(|| {
        CHAINS
            .iter()
            .map(|c| (c.chain_id_hex.to_ascii_lowercase(), c))
            .collect()
    });

/// Returns the chain for a given EIP-155 chain ID, or `None` if unsupported.
pub fn chain_by_id(chain_id: u64) -> Option<&'static ChainDescriptor> {
    CHAIN_BY_ID.get(&chain_id).copied()
}

/// Returns the chain for a wallet-facing hex id such as `0x61`. Case-insensitive.
pub fn chain_by_hex(chain_id_hex: &str) -> Option<&'static ChainDescriptor> {
    CHAIN_BY_HEX
        .get(&chain_id_hex.to_ascii_lowercase())
        .copied()
}
