// src/analyzer.rs
use std::collections::HashSet;

use alloy::primitives::Address;
use serde::Serialize;
use tracing::debug;

use crate::classifier::classify;
use crate::decoders::{self, unknown};
use crate::event::{DecodedEvent, EventKind, UnknownReason};
use crate::log::RawLog;

/// Aggregate counts over one receipt's decoded events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_events: usize,
    pub erc721_transfer_count: usize,
    pub approval_count: usize,
    pub approval_for_all_count: usize,
    pub unknown_count: usize,
    /// Contracts that emitted ERC-721 transfers, first-seen order.
    pub distinct_contract_addresses: Vec<Address>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    pub events: Vec<DecodedEvent>,
    pub summary: AnalysisSummary,
}

impl Analysis {
    /// Only the ERC-721 transfers.
    pub fn transfers(&self) -> impl Iterator<Item = &DecodedEvent> {
        self.events
            .iter()
            .filter(|e| e.kind() == EventKind::Transfer)
    }
}

/// Validate, classify and decode a single log. Always yields an event.
pub fn decode_log(log: &RawLog) -> DecodedEvent {
    let fields = match log.validate() {
        Ok(()) => decoders::decode(log, classify(log)),
        Err(error) => unknown(
            log,
            UnknownReason::DecodeFailed {
                standard: None,
                error,
            },
        ),
    };

    let event = DecodedEvent {
        log_index: log.log_index,
        block_number: log.block_number,
        contract_address: log.address,
        fields,
    };

    if let Some(reason) = event.unknown_reason() {
        debug!(
            log_index = log.log_index,
            address = %log.address,
            ?reason,
            "log left undecoded"
        );
    }
    event
}

/// One event per log, in input order, plus the summary.
pub fn analyze(logs: &[RawLog]) -> Analysis {
    let events: Vec<DecodedEvent> = logs.iter().map(decode_log).collect();
    let summary = summarize(&events);
    Analysis { events, summary }
}

pub fn summarize(events: &[DecodedEvent]) -> AnalysisSummary {
    let mut summary = AnalysisSummary {
        total_events: events.len(),
        ..Default::default()
    };
    let mut seen = HashSet::new();

    for event in events {
        match event.kind() {
            EventKind::Transfer => {
                summary.erc721_transfer_count += 1;
                if seen.insert(event.contract_address) {
                    summary
                        .distinct_contract_addresses
                        .push(event.contract_address);
                }
            }
            EventKind::Approval => summary.approval_count += 1,
            EventKind::ApprovalForAll => summary.approval_for_all_count += 1,
            EventKind::Unknown => summary.unknown_count += 1,
        }
    }

    summary
}
