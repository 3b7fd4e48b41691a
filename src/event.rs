// src/event.rs
use std::fmt;

use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{Serialize, Serializer};

use crate::error::{DecodeError, InputError};
use crate::registry::Standard;

/// The stable four-way tag exposed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    Transfer,
    Approval,
    ApprovalForAll,
    Unknown,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EventKind::Transfer => "Transfer",
            EventKind::Approval => "Approval",
            EventKind::ApprovalForAll => "ApprovalForAll",
            EventKind::Unknown => "Unknown",
        };
        f.write_str(s)
    }
}

/// Why a log ended up as `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum UnknownReason {
    /// No topics at all.
    Anonymous,
    UnrecognizedSignature,
    /// Known hash, wrong number of topics (e.g. an ERC-20 `Transfer`).
    SignatureCollision {
        standard: Standard,
        expected_topics: usize,
        actual_topics: usize,
    },
    DecodeFailed {
        standard: Option<Standard>,
        error: DecodeError,
    },
    /// The log's hex could not be parsed. Raw strings are kept as received.
    InvalidInput {
        error: InputError,
        raw_address: String,
        raw_topics: Vec<String>,
        raw_data: String,
    },
}

/// Decoded payload, tagged by kind. Serializes as `{"kind": .., "fields": {..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "fields", rename_all_fields = "camelCase")]
pub enum EventFields {
    Transfer {
        from: Address,
        to: Address,
        #[serde(serialize_with = "as_decimal")]
        token_id: U256,
    },
    Approval {
        owner: Address,
        approved: Address,
        #[serde(serialize_with = "as_decimal")]
        token_id: U256,
    },
    ApprovalForAll {
        owner: Address,
        operator: Address,
        approved: bool,
    },
    Unknown {
        raw_topics: Vec<B256>,
        raw_data: Bytes,
        reason: UnknownReason,
    },
}

impl EventFields {
    pub fn kind(&self) -> EventKind {
        match self {
            EventFields::Transfer { .. } => EventKind::Transfer,
            EventFields::Approval { .. } => EventKind::Approval,
            EventFields::ApprovalForAll { .. } => EventKind::ApprovalForAll,
            EventFields::Unknown { .. } => EventKind::Unknown,
        }
    }
}

/// One output record per input log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodedEvent {
    pub log_index: u64,
    pub block_number: Option<u64>,
    pub contract_address: Address,
    #[serde(flatten)]
    pub fields: EventFields,
}

impl DecodedEvent {
    pub fn kind(&self) -> EventKind {
        self.fields.kind()
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self.fields, EventFields::Unknown { .. })
    }

    pub fn unknown_reason(&self) -> Option<&UnknownReason> {
        match &self.fields {
            EventFields::Unknown { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

// Token ids can exceed 2^53, so they go out as decimal strings.
fn as_decimal<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
