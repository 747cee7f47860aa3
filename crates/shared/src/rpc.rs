//! JSON-RPC client for querying a node's current gas price.
//!
//! A single `reqwest::Client` is reused across chains for connection pooling. Every
//! request is bounded by the client timeout so a hung endpoint only costs its own chain.

use std::time::Duration;

use async_trait::async_trait;
use num_bigint::BigUint;
use reqwest::Client;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::jsonrpc::{Request, Response};

pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(5);

/// Anything that can report the current gas price of an RPC endpoint.
#[async_trait]
pub trait GasPriceSource: Send + Sync {
    /// Returns the gas price in wei per unit of gas.
    async fn gas_price(&self, rpc_url: &str) -> Result<BigUint, AppError>;
}

/// HTTP JSON-RPC client for EVM nodes.
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: Client,
}

impl RpcClient {
    pub fn try_new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Rpc(e.to_string()))?;
        Ok(Self { client })
    }

    /// Sends one JSON-RPC call and returns its `result`, failing on any error object
    /// or a missing result.
    pub async fn call(
        &self,
        rpc_url: &str,
        method: &str,
        params: Value,
    ) -> Result<Value, AppError> {
        let resp = self
            .client
            .post(rpc_url)
            .json(&Request::new(method, params))
            .send()
            .await
            .map_err(|e| AppError::Rpc(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(AppError::Rpc(format!(
                "{method} on {rpc_url} returned {}",
                resp.status()
            )));
        }

        let body = resp
            .json::<Response>()
            .await
            .map_err(|e| AppError::Rpc(e.to_string()))?;

        if let Some(err) = body.error {
            return Err(AppError::Rpc(format!(
                "{method} on {rpc_url} failed ({}): {}",
                err.code, err.message
            )));
        }

        body.result
            .filter(|v| !v.is_null())
            .ok_or_else(|| AppError::Rpc(format!("{method} on {rpc_url} returned no result")))
    }
}

#[async_trait]
impl GasPriceSource for RpcClient {
    /// See: <https://ethereum.org/en/developers/docs/apis/json-rpc/#eth_gasprice>
    async fn gas_price(&self, rpc_url: &str) -> Result<BigUint, AppError> {
        let result = self.call(rpc_url, "eth_gasPrice", json!([])).await?;
        match result {
            Value::String(s) => parse_quantity(&s),
            other => Err(AppError::Rpc(format!(
                "eth_gasPrice on {rpc_url} returned a non-string result: {other}"
            ))),
        }
    }
}

/// Parses a JSON-RPC quantity (`0x`-prefixed hex, any length) into an unbounded integer.
pub fn parse_quantity(s: &str) -> Result<BigUint, AppError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .ok_or_else(|| AppError::InvalidQuantity(s.to_string()))?;

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AppError::InvalidQuantity(s.to_string()));
    }

    BigUint::parse_bytes(digits.as_bytes(), 16)
        .ok_or_else(|| AppError::InvalidQuantity(s.to_string()))
}

/// Encodes an integer as a JSON-RPC quantity (`0x0` for zero, no leading zeros).
pub fn to_quantity(value: &BigUint) -> String {
    format!("{value:#x}")
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client() -> RpcClient {
        RpcClient::try_new(Duration::from_secs(2)).unwrap()
    }

    async fn server_responding(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(
                json!({"jsonrpc": "2.0", "id": 1, "method": "eth_gasPrice", "params": []}),
            ))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    #[test]
    fn parse_quantity_hex() {
        assert_eq!(
            parse_quantity("0x3b9aca00").unwrap(),
            BigUint::from(1_000_000_000u64)
        );
        assert_eq!(parse_quantity("0X10").unwrap(), BigUint::from(16u32));
        assert_eq!(parse_quantity("0x0").unwrap(), BigUint::from(0u32));
    }

    #[test]
    fn parse_quantity_beyond_u256() {
        let huge = format!("0x1{}", "0".repeat(64));
        let parsed = parse_quantity(&huge).unwrap();
        assert_eq!(parsed, BigUint::from(1u32) << 256u32);
    }

    #[test]
    fn parse_quantity_rejects_malformed() {
        for bad in ["", "0x", "42", "0xzz", "0x_1", "0x 1", "-0x1"] {
            let err = parse_quantity(bad).unwrap_err();
            assert_eq!(err.code(), "INVALID_QUANTITY", "{bad:?} should be rejected");
        }
    }

    #[test]
    fn to_quantity_has_no_leading_zeros() {
        assert_eq!(to_quantity(&BigUint::from(0u32)), "0x0");
        assert_eq!(to_quantity(&BigUint::from(97u32)), "0x61");
    }

    #[tokio::test]
    async fn gas_price_success() {
        let server = server_responding(
            ResponseTemplate::new(200)
                .set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": "0x3b9aca00"})),
        )
        .await;

        let price = client().gas_price(&server.uri()).await.unwrap();
        assert_eq!(price, BigUint::from(1_000_000_000u64));
    }

    #[tokio::test]
    async fn numeric_result_is_rejected() {
        let server = server_responding(
            ResponseTemplate::new(200)
                .set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": 42})),
        )
        .await;

        let err = client().gas_price(&server.uri()).await.unwrap_err();
        assert_eq!(err.code(), "RPC_ERROR");
    }

    #[tokio::test]
    async fn missing_result_is_rejected() {
        let server = server_responding(
            ResponseTemplate::new(200).set_body_json(json!({"jsonrpc": "2.0", "id": 1})),
        )
        .await;

        assert!(client().gas_price(&server.uri()).await.is_err());
    }

    #[tokio::test]
    async fn null_result_is_rejected() {
        let server = server_responding(
            ResponseTemplate::new(200)
                .set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": null})),
        )
        .await;

        let err = client().gas_price(&server.uri()).await.unwrap_err();
        assert!(err.to_string().contains("returned no result"));
    }

    #[tokio::test]
    async fn error_object_is_rejected() {
        let server = server_responding(ResponseTemplate::new(200).set_body_json(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32005, "message": "rate limited"}
        })))
        .await;

        let err = client().gas_price(&server.uri()).await.unwrap_err();
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn non_json_body_is_rejected() {
        let server = server_responding(ResponseTemplate::new(200).set_body_string("<html>")).await;
        assert!(client().gas_price(&server.uri()).await.is_err());
    }

    #[tokio::test]
    async fn http_error_status_is_rejected() {
        let server = server_responding(ResponseTemplate::new(503)).await;
        let err = client().gas_price(&server.uri()).await.unwrap_err();
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn slow_endpoint_times_out() {
        let server = server_responding(
            ResponseTemplate::new(200)
                .set_body_json(json!({"jsonrpc": "2.0", "id": 1, "result": "0x1"}))
                .set_delay(Duration::from_millis(500)),
        )
        .await;

        let client = RpcClient::try_new(Duration::from_millis(50)).unwrap();
        assert!(client.gas_price(&server.uri()).await.is_err());
    }
}
