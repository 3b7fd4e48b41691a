// src/error.rs
use alloy::primitives::B256;
use serde::Serialize;
use thiserror::Error;

/// Failures while decoding a single log. Recorded on the `Unknown` event,
/// never raised out of the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum DecodeError {
    #[error("topic {value} is not a zero-padded address")]
    MalformedTopic { value: B256 },

    #[error("topic {index} missing")]
    MissingTopic { index: usize },

    #[error("data too short: need {needed} bytes, have {actual}")]
    DataTooShort { needed: usize, actual: usize },

    #[error("data length {len} is not a multiple of 32")]
    MisalignedData { len: usize },

    #[error("log carries {count} topics (max 4)")]
    TooManyTopics { count: usize },
}

/// Rejections at the JSON-RPC boundary: bad hex, wrong fixed widths.
/// Raised per log, so one bad entry never sinks the rest of a receipt.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum InputError {
    #[error("{field}: invalid hex: {reason}")]
    InvalidHex { field: &'static str, reason: String },

    #[error("{field}: expected {expected} bytes, got {actual}")]
    WrongWidth {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{field}: invalid quantity `{value}`")]
    InvalidQuantity { field: &'static str, value: String },

    #[error("too many topics: {count} (max 4)")]
    TooManyTopics { count: usize },
}
