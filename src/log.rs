// src/log.rs
use alloy::primitives::{Address, Bytes, B256};
use serde::Serialize;

use crate::codec::WORD;
use crate::error::DecodeError;

/// LOG0..LOG4: a log never carries more than four topics.
pub const MAX_TOPICS: usize = 4;

/// One entry of a receipt's `logs` array, already parsed into fixed-width
/// binary values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLog {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
    pub log_index: u64,
    pub block_number: Option<u64>,
}

impl RawLog {
    /// Event signature hash, absent for anonymous events.
    pub fn signature(&self) -> Option<&B256> {
        self.topics.first()
    }

    /// Container-level checks every log must pass before any decoder looks at it.
    pub fn validate(&self) -> Result<(), DecodeError> {
        if self.topics.len() > MAX_TOPICS {
            return Err(DecodeError::TooManyTopics {
                count: self.topics.len(),
            });
        }
        if self.data.len() % WORD != 0 {
            return Err(DecodeError::MisalignedData {
                len: self.data.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(topics: usize, data_len: usize) -> RawLog {
        RawLog {
            address: Address::ZERO,
            topics: vec![B256::ZERO; topics],
            data: Bytes::from(vec![0u8; data_len]),
            log_index: 0,
            block_number: None,
        }
    }

    #[test]
    fn validate_accepts_standard_shapes() {
        assert!(log(0, 0).validate().is_ok());
        assert!(log(4, 64).validate().is_ok());
        assert!(log(1, 0).signature().is_some());
        assert!(log(0, 0).signature().is_none());
    }

    #[test]
    fn validate_rejects_structural_violations() {
        assert_eq!(
            log(5, 0).validate(),
            Err(DecodeError::TooManyTopics { count: 5 })
        );
        assert_eq!(
            log(3, 16).validate(),
            Err(DecodeError::MisalignedData { len: 16 })
        );
    }
}
