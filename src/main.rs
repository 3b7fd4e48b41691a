mod config;
mod rpc;
mod source;

use eyre::WrapErr;
use receipt_decoder::{analyze_receipt, codec, Receipt};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::source::ReceiptSource;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // stdout carries the JSON report, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cfg = config::load()?;

    let tx_hash = std::env::args().nth(1).or_else(|| cfg.tx_hash.clone());
    if let Some(hash) = &tx_hash {
        codec::parse_b256("transactionHash", hash).wrap_err("invalid transaction hash")?;
    }

    let source = ReceiptSource::from_config(&cfg, tx_hash)?;
    let raw = source.fetch(&cfg).await?;
    let receipt = Receipt::try_from(&raw).wrap_err("malformed receipt")?;

    let report = analyze_receipt(&receipt);
    let summary = &report.summary;
    info!(
        "Decoded {} logs: {} transfers, {} approvals, {} approval-for-all, {} unknown",
        summary.total_events,
        summary.erc721_transfer_count,
        summary.approval_count,
        summary.approval_for_all_count,
        summary.unknown_count
    );
    if summary.unknown_count > 0 {
        warn!("{} logs could not be decoded", summary.unknown_count);
    }
    for contract in &summary.distinct_contract_addresses {
        info!("  NFT contract: {}", contract);
    }
    if let Some(hash) = report.transaction_hash {
        info!("Explorer: {}", cfg.explorer_link(&hash.to_string()));
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
