//! JSON-RPC transport to an EVM node.

use crate::error::RpcError;
use alloy_sol_types::SolCall;
use rytell_earn_domain::Address;
use rytell_earn_domain::enums::BlockTag;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the RPC provider.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    /// HTTP endpoint of the node.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "https://api.avax.network/ext/bc/C/rpc".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

/// Extracts `result` from a JSON-RPC response body.
pub(crate) fn parse_response(body: Value) -> Result<Value, RpcError> {
    let response: RpcResponse = serde_json::from_value(body)
        .map_err(|e| RpcError::InvalidResponse(e.to_string()))?;
    if let Some(error) = response.error {
        return Err(RpcError::Node {
            code: error.code,
            message: error.message,
        });
    }
    response
        .result
        .ok_or_else(|| RpcError::InvalidResponse("missing result".to_string()))
}

/// Read-only JSON-RPC client.
pub struct RpcProvider {
    client: reqwest::Client,
    config: RpcConfig,
    next_id: AtomicU64,
}

impl RpcProvider {
    /// Creates a new provider.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: RpcConfig) -> Result<Self, RpcError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            config,
            next_id: AtomicU64::new(1),
        })
    }

    /// Returns the configured endpoint.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Sends one JSON-RPC request and returns its `result`.
    pub async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        debug!(id, method, "Sending RPC request");
        let body: Value = self
            .client
            .post(&self.config.url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        parse_response(body).inspect_err(|e| {
            warn!(id, method, error = %e, "RPC request failed");
        })
    }

    /// Executes a read-only call and returns the raw return data.
    pub async fn eth_call(
        &self,
        to: Address,
        data: &[u8],
        block: BlockTag,
    ) -> Result<Vec<u8>, RpcError> {
        let result = self
            .request(
                "eth_call",
                json!([
                    { "to": format!("{to:?}"), "data": format!("0x{}", hex::encode(data)) },
                    block.to_string()
                ]),
            )
            .await?;
        let encoded = result
            .as_str()
            .ok_or_else(|| RpcError::InvalidResponse("eth_call result is not a string".into()))?;
        decode_hex_response(encoded)
    }

    /// Encodes `call`, executes it against `to` and decodes its return values.
    pub async fn call<C: SolCall>(
        &self,
        to: Address,
        call: &C,
        block: BlockTag,
    ) -> Result<C::Return, RpcError> {
        let bytes = self.eth_call(to, &call.abi_encode(), block).await?;
        C::abi_decode_returns(&bytes).map_err(|e| {
            RpcError::AbiDecoding(format!("{}: {e}", C::SIGNATURE))
        })
    }
}

/// Decodes the hex string returned by `eth_call`.
pub(crate) fn decode_hex_response(encoded: &str) -> Result<Vec<u8>, RpcError> {
    let stripped = encoded.strip_prefix("0x").unwrap_or(encoded);
    hex::decode(stripped).map_err(|e| RpcError::InvalidResponse(format!("bad hex: {e}")))
}
