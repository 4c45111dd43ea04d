// funder/src/rpc.rs

use std::time::Duration;

use async_trait::async_trait;
use ethers::types::U256;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::balance::parse_hex_wei;
use crate::error::FunderError;
use crate::wallet::WalletAddress;

/// Read-only balance source. The monitor only talks to this seam, which keeps
/// the poll/claim state machine testable without a live node.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    /// Current balance of `address` at the latest block, in wei.
    async fn balance_wei(&self, address: &WalletAddress) -> Result<U256, FunderError>;
}

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: (&'a str, &'static str),
    id: u32,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// `eth_getBalance` over plain HTTPS POST.
pub struct HttpChainRpc {
    client: reqwest::Client,
    url: String,
}

impl HttpChainRpc {
    pub fn new(url: &str, timeout: Duration) -> Result<Self, FunderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FunderError::RpcTransport { reason: format!("failed to build HTTP client: {}", e) })?;
        Ok(Self { client, url: url.to_string() })
    }
}

#[async_trait]
impl ChainRpc for HttpChainRpc {
    async fn balance_wei(&self, address: &WalletAddress) -> Result<U256, FunderError> {
        let address_hex = address.to_hex();
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            method: "eth_getBalance",
            params: (address_hex.as_str(), "latest"),
            id: 1,
        };
        debug!(url = %self.url, address = %address_hex, "Sending eth_getBalance");

        let response = self
            .client
            .post(&self.url)
            .json(&body)
            .send()
            .await
            .map_err(|e| FunderError::RpcTransport { reason: e.to_string() })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FunderError::RpcTransport {
                reason: format!("RPC endpoint returned HTTP {}", status),
            });
        }

        let parsed: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| FunderError::MalformedRpcResponse(format!("invalid JSON body: {}", e)))?;

        if let Some(err) = parsed.error {
            return Err(FunderError::RpcTransport {
                reason: format!("node error {}: {}", err.code, err.message),
            });
        }

        // A null or missing result is a malformed response, never a zero
        // balance.
        let result = match parsed.result {
            Some(Value::String(hex_wei)) => hex_wei,
            Some(Value::Null) | None => {
                return Err(FunderError::MalformedRpcResponse(
                    "result field is null or missing".to_string(),
                ))
            }
            Some(other) => {
                return Err(FunderError::MalformedRpcResponse(format!(
                    "result field is not a string: {}",
                    other
                )))
            }
        };

        let wei = parse_hex_wei(&result)?;
        debug!(balance_wei = %wei, "Balance fetched");
        Ok(wei)
    }
}
