// src/source.rs
use eyre::{Result, WrapErr};
use receipt_decoder::RpcReceipt;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::rpc;

/// Where the raw receipt comes from. Decoding never touches this.
#[derive(Debug, Clone)]
pub enum ReceiptSource {
    File(PathBuf),
    Rpc { url: String, tx_hash: String },
}

impl ReceiptSource {
    pub fn from_config(cfg: &Config, tx_hash: Option<String>) -> Result<Self> {
        if let Some(path) = &cfg.receipt_file {
            return Ok(ReceiptSource::File(PathBuf::from(path)));
        }
        let tx_hash = tx_hash
            .ok_or_else(|| eyre::eyre!("no transaction hash given (argument or TX_HASH)"))?;
        Ok(ReceiptSource::Rpc {
            url: cfg.rpc_http_url.clone(),
            tx_hash,
        })
    }

    pub async fn fetch(&self, cfg: &Config) -> Result<RpcReceipt> {
        match self {
            ReceiptSource::File(path) => {
                info!("Reading receipt from {}", path.display());
                let text = tokio::fs::read_to_string(path)
                    .await
                    .wrap_err_with(|| format!("reading {}", path.display()))?;
                parse_receipt_json(&text)
            }
            ReceiptSource::Rpc { url, tx_hash } => {
                rpc::get_transaction_receipt(
                    url,
                    tx_hash,
                    Duration::from_secs(cfg.rpc_timeout_secs),
                    cfg.rpc_retries,
                )
                .await
            }
        }
    }
}

/// Accepts a bare receipt object or a saved JSON-RPC response.
pub fn parse_receipt_json(text: &str) -> Result<RpcReceipt> {
    let value: Value = serde_json::from_str(text)?;
    if value.get("result").is_some() || value.get("error").is_some() {
        return rpc::parse_response(text);
    }
    Ok(serde_json::from_value(value)?)
}
