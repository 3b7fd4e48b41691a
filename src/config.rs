use dotenvy::dotenv;
use eyre::Result;
use std::env;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Config {
    pub rpc_http_url: String,
    pub explorer_tx_url: String,
    pub receipt_file: Option<String>,
    pub tx_hash: Option<String>,
    pub rpc_timeout_secs: u64,
    pub rpc_retries: u32,
}

pub fn load() -> Result<Config> {
    dotenv().ok();

    // RPC endpoint (alias POLYGON_RPC, fallback polygon-rpc.com)
    let rpc_http_url = env::var("RPC_HTTP_URL")
        .or_else(|_| env::var("POLYGON_RPC"))
        .unwrap_or_else(|_| "https://polygon-rpc.com".to_string());

    let explorer_tx_url = env::var("EXPLORER_TX_URL")
        .unwrap_or_else(|_| "https://polygonscan.com/tx/".to_string());

    // Offline mode: read a saved receipt instead of calling the node
    let receipt_file = env::var("RECEIPT_FILE").ok().filter(|s| !s.trim().is_empty());

    let tx_hash = env::var("TX_HASH").ok().filter(|s| !s.trim().is_empty());

    let rpc_timeout_secs = env::var("RPC_TIMEOUT_SECS")
        .unwrap_or_else(|_| "15".to_string())
        .parse()
        .unwrap_or(15);

    let rpc_retries = env::var("RPC_RETRIES")
        .unwrap_or_else(|_| "3".to_string())
        .parse::<u32>()
        .unwrap_or(3)
        .max(1);

    let cfg = Config {
        rpc_http_url,
        explorer_tx_url,
        receipt_file,
        tx_hash,
        rpc_timeout_secs,
        rpc_retries,
    };

    debug!("Loaded config: {:?}", cfg);

    Ok(cfg)
}

impl Config {
    pub fn explorer_link(&self, tx_hash: &str) -> String {
        format!("{}{}", self.explorer_tx_url, tx_hash)
    }
}
