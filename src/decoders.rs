// src/decoders.rs
//! One pure function per known event shape.

use alloy::primitives::B256;

use crate::classifier::Classification;
use crate::codec::{parse_address, parse_u256, slice_word};
use crate::error::DecodeError;
use crate::event::{EventFields, UnknownReason};
use crate::log::RawLog;

pub type Decoder = fn(&RawLog) -> Result<EventFields, DecodeError>;

fn topic(log: &RawLog, index: usize) -> Result<&B256, DecodeError> {
    log.topics
        .get(index)
        .ok_or(DecodeError::MissingTopic { index })
}

/// `Transfer(address indexed from, address indexed to, uint256 indexed tokenId)`
pub fn decode_transfer_721(log: &RawLog) -> Result<EventFields, DecodeError> {
    Ok(EventFields::Transfer {
        from: parse_address(topic(log, 1)?)?,
        to: parse_address(topic(log, 2)?)?,
        token_id: parse_u256(topic(log, 3)?),
    })
}

/// `Approval(address indexed owner, address indexed approved, uint256 indexed tokenId)`
pub fn decode_approval_721(log: &RawLog) -> Result<EventFields, DecodeError> {
    Ok(EventFields::Approval {
        owner: parse_address(topic(log, 1)?)?,
        approved: parse_address(topic(log, 2)?)?,
        token_id: parse_u256(topic(log, 3)?),
    })
}

/// `ApprovalForAll(address indexed owner, address indexed operator, bool approved)`
///
/// The flag is not indexed, so it sits in the first data word.
pub fn decode_approval_for_all_721(log: &RawLog) -> Result<EventFields, DecodeError> {
    Ok(EventFields::ApprovalForAll {
        owner: parse_address(topic(log, 1)?)?,
        operator: parse_address(topic(log, 2)?)?,
        approved: !slice_word(&log.data, 0)?.is_zero(),
    })
}

pub(crate) fn unknown(log: &RawLog, reason: UnknownReason) -> EventFields {
    EventFields::Unknown {
        raw_topics: log.topics.clone(),
        raw_data: log.data.clone(),
        reason,
    }
}

/// Turn a classification into fields. Anything that is not a clean match, or
/// whose decoder fails, becomes `Unknown`.
pub fn decode(log: &RawLog, classification: Classification) -> EventFields {
    match classification {
        Classification::Matched(signature) => (signature.decode)(log).unwrap_or_else(|error| {
            unknown(
                log,
                UnknownReason::DecodeFailed {
                    standard: Some(signature.standard),
                    error,
                },
            )
        }),
        Classification::SignatureCollision {
            signature,
            topic_count,
        } => unknown(
            log,
            UnknownReason::SignatureCollision {
                standard: signature.standard,
                expected_topics: signature.expected_topic_count,
                actual_topics: topic_count,
            },
        ),
        Classification::Unclassifiable if log.topics.is_empty() => {
            unknown(log, UnknownReason::Anonymous)
        }
        Classification::Unclassifiable => unknown(log, UnknownReason::UnrecognizedSignature),
    }
}
