use crate::core::hash::token_id;
use crate::domain::ports::ExpirationOracle;
use crate::utils::error::{OracleError, Result};
use alloy_primitives::{address, hex, Address, B256, U256};
use alloy_sol_types::{sol, SolCall};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// ENS base registrar on mainnet.
pub const ENS_BASE_REGISTRAR: Address = address!("0x57f1887a8BF19b14fC0dF6Fd9B2acc9Af147eA85");

pub const ALCHEMY_MAINNET_URL: &str = "https://eth-mainnet.g.alchemy.com/v2/";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

sol! {
    function nameExpires(uint256 id) external view returns (uint256);
}

pub fn alchemy_url(api_key: &str) -> String {
    format!("{}{}", ALCHEMY_MAINNET_URL, api_key)
}

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: (CallRequest<'a>, &'static str),
}

#[derive(Serialize)]
struct CallRequest<'a> {
    to: &'a str,
    data: String,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    result: Option<String>,
    error: Option<JsonRpcErrorObject>,
}

#[derive(Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
}

/// Reads `nameExpires` through a plain JSON-RPC `eth_call`.
pub struct RpcExpirationOracle {
    client: Client,
    endpoint: String,
    registrar: String,
    next_id: AtomicU64,
}

impl RpcExpirationOracle {
    pub fn new(endpoint: impl Into<String>, registrar: Address, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            registrar: registrar.to_string(),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn mainnet(endpoint: impl Into<String>) -> Result<Self> {
        Self::new(endpoint, ENS_BASE_REGISTRAR, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn encode_call(label_hash: B256) -> String {
        let call = nameExpiresCall {
            id: token_id(label_hash),
        };
        hex::encode_prefixed(call.abi_encode())
    }

    fn decode_return(raw: &str) -> std::result::Result<u64, OracleError> {
        let bytes = hex::decode(raw).map_err(|e| OracleError::Decode(format!("bad hex: {}", e)))?;
        let expires: U256 = nameExpiresCall::abi_decode_returns(&bytes)
            .map_err(|e| OracleError::Decode(e.to_string()))?;
        u64::try_from(expires).map_err(|_| OracleError::OutOfRange(expires.to_string()))
    }
}

#[async_trait]
impl ExpirationOracle for RpcExpirationOracle {
    async fn get_expiration(&self, label_hash: B256) -> std::result::Result<u64, OracleError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method: "eth_call",
            params: (
                CallRequest {
                    to: &self.registrar,
                    data: Self::encode_call(label_hash),
                },
                "latest",
            ),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| OracleError::Transport(e.to_string()))?;

        let status = response.status();
        tracing::debug!("RPC response status: {}", status);
        if !status.is_success() {
            return Err(OracleError::HttpStatus(status.as_u16()));
        }

        let body: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Decode(e.to_string()))?;

        if let Some(error) = body.error {
            return Err(OracleError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        let raw = body
            .result
            .ok_or_else(|| OracleError::Decode("response has neither result nor error".to_string()))?;
        Self::decode_return(&raw)
    }
}
