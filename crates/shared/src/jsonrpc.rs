//! JSON-RPC 2.0 envelope shared by the node client and the HTTP wallet.
//!
//! See: <https://www.jsonrpc.org/specification>

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Outgoing request. Every call carries `id: 1` since requests are never batched.
#[derive(Debug, Serialize)]
pub struct Request<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Value,
}

impl<'a> Request<'a> {
    pub fn new(method: &'a str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        }
    }
}

/// Incoming response. `result` is kept untyped so callers can reject
/// wrongly-typed payloads themselves.
///
/// `result` is `None` only when the field is absent; `"result": null` is `Some(Null)`.
#[derive(Debug, Deserialize)]
pub struct Response {
    #[serde(default, deserialize_with = "present")]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<ErrorObject>,
}

fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorObject {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}
