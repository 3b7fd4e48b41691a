// src/rpc.rs
use eyre::{eyre, Result};
use receipt_decoder::RpcReceipt;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Unwrap a JSON-RPC envelope. A `null` result means the node does not know
/// the transaction (or it is still pending).
pub fn parse_response<T: DeserializeOwned>(text: &str) -> Result<T> {
    let parsed: RpcResponse<T> = serde_json::from_str(text)?;
    if let Some(err) = parsed.error {
        return Err(eyre!("RPC error {}: {}", err.code, err.message));
    }
    parsed
        .result
        .ok_or_else(|| eyre!("receipt not found (unknown or pending transaction)"))
}

/// `eth_getTransactionReceipt` with timeout and retries
pub async fn get_transaction_receipt(
    rpc_url: &str,
    tx_hash: &str,
    timeout: Duration,
    retries: u32,
) -> Result<RpcReceipt> {
    let client = Client::builder().timeout(timeout).build()?;
    let retries = retries.max(1);

    let payload = json!({
        "jsonrpc": "2.0",
        "id": 1,
        "method": "eth_getTransactionReceipt",
        "params": [tx_hash]
    });

    for attempt in 1..=retries {
        info!("Sending eth_getTransactionReceipt → {} ({})", rpc_url, tx_hash);

        match client.post(rpc_url).json(&payload).send().await {
            Ok(resp) => {
                if resp.status() != StatusCode::OK {
                    return Err(eyre!("RPC error: HTTP {}", resp.status()));
                }
                let text = resp.text().await?;
                debug!("Raw receipt response: {}", text);
                return parse_response(&text);
            }
            Err(e) if attempt < retries => {
                warn!(
                    "RPC request failed (attempt {}): {}. Retrying...",
                    attempt, e
                );
                tokio::time::sleep(Duration::from_secs(2)).await;
            }
            Err(e) => {
                return Err(eyre!("RPC request failed after {} attempts: {}", attempt, e))
            }
        }
    }

    Err(eyre!("Unreachable: retries exhausted"))
}
