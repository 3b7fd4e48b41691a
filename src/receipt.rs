// src/receipt.rs
//! `eth_getTransactionReceipt` payloads as they arrive over JSON-RPC, and
//! their conversion into fixed-width values.

use alloy::primitives::{Address, B256};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analyzer::{decode_log, summarize, AnalysisSummary};
use crate::codec::{parse_address_hex, parse_b256, parse_data, parse_quantity};
use crate::error::InputError;
use crate::event::{DecodedEvent, EventFields, UnknownReason};
use crate::log::{RawLog, MAX_TOPICS};

/// Nodes and explorers disagree on whether numbers are hex strings or integers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(u64),
    Text(String),
}

impl Quantity {
    pub fn to_u64(&self, field: &'static str) -> Result<u64, InputError> {
        match self {
            Quantity::Number(n) => Ok(*n),
            Quantity::Text(s) => parse_quantity(field, s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcLog {
    pub address: String,
    pub topics: Vec<String>,
    #[serde(default)]
    pub data: String,
    pub log_index: Option<Quantity>,
    pub block_number: Option<Quantity>,
    pub transaction_hash: Option<String>,
}

impl RawLog {
    /// `position` stands in for `logIndex` when the node omits it.
    pub fn from_rpc(log: &RpcLog, position: usize) -> Result<Self, InputError> {
        if log.topics.len() > MAX_TOPICS {
            return Err(InputError::TooManyTopics {
                count: log.topics.len(),
            });
        }

        let topics = log
            .topics
            .iter()
            .map(|t| parse_b256("topic", t))
            .collect::<Result<Vec<_>, _>>()?;

        let log_index = match &log.log_index {
            Some(q) => q.to_u64("logIndex")?,
            None => position as u64,
        };

        Ok(RawLog {
            address: parse_address_hex("address", &log.address)?,
            topics,
            data: parse_data(&log.data)?,
            log_index,
            block_number: log
                .block_number
                .as_ref()
                .map(|q| q.to_u64("blockNumber"))
                .transpose()?,
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RpcReceipt {
    pub transaction_hash: Option<String>,
    pub block_number: Option<Quantity>,
    pub gas_used: Option<Quantity>,
    pub status: Option<Quantity>,
    pub from: Option<String>,
    pub to: Option<String>,
    #[serde(default)]
    pub logs: Vec<RpcLog>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Success,
    Failed,
    Unknown,
}

/// A log the boundary could not parse. Kept in place so it still yields an
/// `Unknown` event at its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLog {
    pub position: usize,
    pub raw: RpcLog,
    pub error: InputError,
}

impl InvalidLog {
    /// Salvage whatever metadata does parse; the rest stays as raw strings.
    pub fn to_event(&self) -> DecodedEvent {
        let log_index = match &self.raw.log_index {
            Some(q) => q.to_u64("logIndex").unwrap_or(self.position as u64),
            None => self.position as u64,
        };

        DecodedEvent {
            log_index,
            block_number: self
                .raw
                .block_number
                .as_ref()
                .and_then(|q| q.to_u64("blockNumber").ok()),
            contract_address: parse_address_hex("address", &self.raw.address)
                .unwrap_or(Address::ZERO),
            fields: EventFields::Unknown {
                raw_topics: Vec::new(),
                raw_data: Default::default(),
                reason: UnknownReason::InvalidInput {
                    error: self.error.clone(),
                    raw_address: self.raw.address.clone(),
                    raw_topics: self.raw.topics.clone(),
                    raw_data: self.raw.data.clone(),
                },
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptLog {
    Parsed(RawLog),
    Invalid(InvalidLog),
}

impl ReceiptLog {
    pub fn from_rpc(log: &RpcLog, position: usize) -> Self {
        match RawLog::from_rpc(log, position) {
            Ok(parsed) => ReceiptLog::Parsed(parsed),
            Err(error) => ReceiptLog::Invalid(InvalidLog {
                position,
                raw: log.clone(),
                error,
            }),
        }
    }

    pub fn to_event(&self) -> DecodedEvent {
        match self {
            ReceiptLog::Parsed(log) => decode_log(log),
            ReceiptLog::Invalid(invalid) => {
                debug!(
                    position = invalid.position,
                    error = %invalid.error,
                    "log rejected at the boundary"
                );
                invalid.to_event()
            }
        }
    }
}

/// A receipt with its logs parsed one by one. Header fields are pass-through
/// metadata; a malformed header is the only thing that rejects the receipt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_hash: Option<B256>,
    pub block_number: Option<u64>,
    pub gas_used: Option<u64>,
    pub status: TxStatus,
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub logs: Vec<ReceiptLog>,
}

impl Receipt {
    /// Logs that parsed cleanly, in receipt order.
    pub fn raw_logs(&self) -> impl Iterator<Item = &RawLog> {
        self.logs.iter().filter_map(|entry| match entry {
            ReceiptLog::Parsed(log) => Some(log),
            ReceiptLog::Invalid(_) => None,
        })
    }
}

fn opt_address(field: &'static str, s: &Option<String>) -> Result<Option<Address>, InputError> {
    s.as_deref().map(|s| parse_address_hex(field, s)).transpose()
}

impl TryFrom<&RpcReceipt> for Receipt {
    type Error = InputError;

    fn try_from(rpc: &RpcReceipt) -> Result<Self, Self::Error> {
        let logs = rpc
            .logs
            .iter()
            .enumerate()
            .map(|(position, log)| ReceiptLog::from_rpc(log, position))
            .collect();

        let status = match rpc.status.as_ref().map(|q| q.to_u64("status")).transpose()? {
            Some(1) => TxStatus::Success,
            Some(0) => TxStatus::Failed,
            _ => TxStatus::Unknown,
        };

        Ok(Receipt {
            transaction_hash: rpc
                .transaction_hash
                .as_deref()
                .map(|h| parse_b256("transactionHash", h))
                .transpose()?,
            block_number: rpc
                .block_number
                .as_ref()
                .map(|q| q.to_u64("blockNumber"))
                .transpose()?,
            gas_used: rpc
                .gas_used
                .as_ref()
                .map(|q| q.to_u64("gasUsed"))
                .transpose()?,
            status,
            from: opt_address("from", &rpc.from)?,
            to: opt_address("to", &rpc.to)?,
            logs,
        })
    }
}

/// What a caller renders for one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptReport {
    pub transaction_hash: Option<B256>,
    pub block_number: Option<u64>,
    pub gas_used: Option<u64>,
    pub status: TxStatus,
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub summary: AnalysisSummary,
    pub events: Vec<DecodedEvent>,
}

pub fn analyze_receipt(receipt: &Receipt) -> ReceiptReport {
    let events: Vec<DecodedEvent> = receipt.logs.iter().map(ReceiptLog::to_event).collect();
    let summary = summarize(&events);
    ReceiptReport {
        transaction_hash: receipt.transaction_hash,
        block_number: receipt.block_number,
        gas_used: receipt.gas_used,
        status: receipt.status,
        from: receipt.from,
        to: receipt.to,
        summary,
        events,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rpc_log(topics: Vec<String>) -> RpcLog {
        RpcLog {
            address: format!("0x{}", "ab".repeat(20)),
            topics,
            data: "0x".into(),
            log_index: None,
            block_number: Some(Quantity::Text("0x10".into())),
            transaction_hash: None,
        }
    }

    #[test]
    fn log_index_falls_back_to_position() {
        let log = RawLog::from_rpc(&rpc_log(vec![]), 7).unwrap();
        assert_eq!(log.log_index, 7);
        assert_eq!(log.block_number, Some(16));
    }

    #[test]
    fn wrong_width_topic_is_rejected() {
        let err = RawLog::from_rpc(&rpc_log(vec![format!("0x{}", "00".repeat(20))]), 0)
            .unwrap_err();
        assert_eq!(
            err,
            InputError::WrongWidth {
                field: "topic",
                expected: 32,
                actual: 20
            }
        );
    }

    #[test]
    fn five_topics_are_rejected() {
        let topic = format!("0x{}", "00".repeat(32));
        let err = RawLog::from_rpc(&rpc_log(vec![topic; 5]), 0).unwrap_err();
        assert_eq!(err, InputError::TooManyTopics { count: 5 });
    }

    #[test]
    fn receipt_from_json() {
        let value = json!({
            "transactionHash": format!("0x{}", "11".repeat(32)),
            "blockNumber": "0x2a",
            "gasUsed": 21000,
            "status": "0x1",
            "from": format!("0x{}", "22".repeat(20)),
            "to": null,
            "logs": [{
                "address": format!("0x{}", "33".repeat(20)),
                "topics": [],
                "data": "0x",
                "logIndex": "0x0",
                "blockNumber": "0x2a"
            }]
        });

        let rpc: RpcReceipt = serde_json::from_value(value).unwrap();
        let receipt = Receipt::try_from(&rpc).unwrap();
        assert_eq!(receipt.block_number, Some(42));
        assert_eq!(receipt.gas_used, Some(21000));
        assert_eq!(receipt.status, TxStatus::Success);
        assert!(receipt.to.is_none());
        assert_eq!(receipt.logs.len(), 1);

        let report = analyze_receipt(&receipt);
        assert_eq!(report.summary.total_events, 1);
        assert_eq!(report.summary.unknown_count, 1);
    }

    fn transfer_log(token: u64) -> RpcLog {
        rpc_log(vec![
            crate::registry::TRANSFER_TOPIC.to_string(),
            format!("0x{}{}", "00".repeat(12), "11".repeat(20)),
            format!("0x{}{}", "00".repeat(12), "22".repeat(20)),
            format!("0x{token:064x}"),
        ])
    }

    fn receipt_with(logs: Vec<RpcLog>) -> Receipt {
        let mut rpc: RpcReceipt = serde_json::from_value(json!({ "logs": [] })).unwrap();
        rpc.logs = logs;
        Receipt::try_from(&rpc).unwrap()
    }

    #[test]
    fn one_bad_log_does_not_sink_the_receipt() {
        let mut logs: Vec<RpcLog> = (0..199).map(transfer_log).collect();
        let mut bad = transfer_log(999);
        bad.topics[1] = format!("0x{}", "aa".repeat(21));
        logs.insert(100, bad);

        let receipt = receipt_with(logs);
        assert_eq!(receipt.logs.len(), 200);
        assert_eq!(receipt.raw_logs().count(), 199);

        let report = analyze_receipt(&receipt);
        assert_eq!(report.events.len(), 200);
        assert_eq!(report.summary.erc721_transfer_count, 199);
        assert_eq!(report.summary.unknown_count, 1);

        let event = &report.events[100];
        assert_eq!(event.log_index, 100);
        match event.unknown_reason() {
            Some(UnknownReason::InvalidInput { error, raw_topics, .. }) => {
                assert_eq!(
                    *error,
                    InputError::WrongWidth {
                        field: "topic",
                        expected: 32,
                        actual: 21
                    }
                );
                assert_eq!(raw_topics[1], format!("0x{}", "aa".repeat(21)));
            }
            other => panic!("expected invalid input, got {other:?}"),
        }
        assert_eq!(report.events[101].log_index, 101);
    }

    #[test]
    fn bad_address_keeps_raw_strings() {
        let mut bad = rpc_log(vec![]);
        bad.address = "0x1234".into();
        bad.data = "0xabc".into();
        let report = analyze_receipt(&receipt_with(vec![rpc_log(vec![]), bad]));

        let event = &report.events[1];
        assert_eq!(event.log_index, 1);
        assert_eq!(event.block_number, Some(16));
        assert_eq!(event.contract_address, Address::ZERO);
        match event.unknown_reason() {
            Some(UnknownReason::InvalidInput {
                error,
                raw_address,
                raw_data,
                ..
            }) => {
                assert!(matches!(error, InputError::WrongWidth { field: "address", .. }));
                assert_eq!(raw_address, "0x1234");
                assert_eq!(raw_data, "0xabc");
            }
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn odd_length_data_is_isolated() {
        let mut bad = transfer_log(1);
        bad.data = "0x123".into();
        let receipt = receipt_with(vec![transfer_log(0), bad]);

        assert!(matches!(
            &receipt.logs[1],
            ReceiptLog::Invalid(InvalidLog {
                position: 1,
                error: InputError::InvalidHex { field: "data", .. },
                ..
            })
        ));
        assert_eq!(analyze_receipt(&receipt).summary.erc721_transfer_count, 1);
    }

    #[test]
    fn malformed_header_rejects_the_receipt() {
        let rpc: RpcReceipt = serde_json::from_value(json!({
            "transactionHash": "0x1234",
            "logs": []
        }))
        .unwrap();
        assert!(matches!(
            Receipt::try_from(&rpc),
            Err(InputError::WrongWidth {
                field: "transactionHash",
                ..
            })
        ));
    }

    #[test]
    fn invalid_input_serializes_with_its_error() {
        let mut bad = rpc_log(vec![]);
        bad.address = "0x1234".into();
        let report = analyze_receipt(&receipt_with(vec![bad]));

        let value = serde_json::to_value(&report.events[0]).unwrap();
        assert_eq!(value["kind"], json!("Unknown"));
        assert_eq!(value["fields"]["reason"]["type"], json!("invalidInput"));
        assert_eq!(value["fields"]["reason"]["error"]["type"], json!("wrongWidth"));
        assert_eq!(value["fields"]["reason"]["rawAddress"], json!("0x1234"));
    }
}
