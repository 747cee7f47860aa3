//! Shared library for finding the cheapest test network for a native transfer and
//! routing a wallet donation there.

pub mod chains;
pub mod config;
pub mod donation;
pub mod error;
pub mod jsonrpc;
pub mod models;
pub mod resolver;
pub mod rpc;
pub mod wallet;
