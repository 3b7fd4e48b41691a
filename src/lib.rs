//! Decode the `logs` of an EVM transaction receipt into typed ERC-721 events
//! without contract ABIs.
//!
//! Every log produces exactly one [`DecodedEvent`]; logs that cannot be decoded
//! become [`EventKind::Unknown`] carrying the reason, instead of being dropped.

pub mod analyzer;
pub mod classifier;
pub mod codec;
pub mod decoders;
pub mod error;
pub mod event;
pub mod log;
pub mod receipt;
pub mod registry;

pub use analyzer::{analyze, decode_log, Analysis, AnalysisSummary};
pub use classifier::{classify, Classification};
pub use error::{DecodeError, InputError};
pub use event::{DecodedEvent, EventFields, EventKind, UnknownReason};
pub use log::RawLog;
pub use receipt::{
    analyze_receipt, InvalidLog, Receipt, ReceiptLog, ReceiptReport, RpcLog, RpcReceipt, TxStatus,
};
pub use registry::{EventSignature, Standard};
