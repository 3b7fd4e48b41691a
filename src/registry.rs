// src/registry.rs
//! Known event signatures, keyed by their keccak-256 topic hash.
//!
//! Hashes are precomputed; nothing here hashes at runtime. Supporting a new
//! event means appending a row (and its decoder), nothing else.

use std::fmt;

use alloy::primitives::{b256, B256};
use serde::Serialize;

use crate::decoders::{self, Decoder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Standard {
    #[serde(rename = "ERC721Transfer")]
    Erc721Transfer,
    #[serde(rename = "ERC721Approval")]
    Erc721Approval,
    #[serde(rename = "ERC721ApprovalForAll")]
    Erc721ApprovalForAll,
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Standard::Erc721Transfer => "ERC721Transfer",
            Standard::Erc721Approval => "ERC721Approval",
            Standard::Erc721ApprovalForAll => "ERC721ApprovalForAll",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct EventSignature {
    pub hash: B256,
    pub declaration: &'static str,
    pub standard: Standard,
    /// Exact topic count, signature hash included.
    pub expected_topic_count: usize,
    pub decode: Decoder,
}

/// keccak256("Transfer(address,address,uint256)")
pub const TRANSFER_TOPIC: B256 =
    b256!("ddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef");

/// keccak256("Approval(address,address,uint256)")
pub const APPROVAL_TOPIC: B256 =
    b256!("8c5be1e5ebec7d5bd14f71427d1e84f3dd0314c0f7b2291e5b200ac8c7c3b925");

/// keccak256("ApprovalForAll(address,address,bool)")
pub const APPROVAL_FOR_ALL_TOPIC: B256 =
    b256!("17307eab39ab6107e8899845ad3d59bd9653f200f220920489ca2b5937696c31");

pub static SIGNATURES: &[EventSignature] = &[
    EventSignature {
        hash: TRANSFER_TOPIC,
        declaration: "Transfer(address,address,uint256)",
        standard: Standard::Erc721Transfer,
        expected_topic_count: 4,
        decode: decoders::decode_transfer_721,
    },
    EventSignature {
        hash: APPROVAL_TOPIC,
        declaration: "Approval(address,address,uint256)",
        standard: Standard::Erc721Approval,
        expected_topic_count: 4,
        decode: decoders::decode_approval_721,
    },
    EventSignature {
        hash: APPROVAL_FOR_ALL_TOPIC,
        declaration: "ApprovalForAll(address,address,bool)",
        standard: Standard::Erc721ApprovalForAll,
        expected_topic_count: 3,
        decode: decoders::decode_approval_for_all_721,
    },
];

/// Exact match on `topics[0]`.
pub fn lookup(hash: &B256) -> Option<&'static EventSignature> {
    SIGNATURES.iter().find(|sig| sig.hash == *hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn hashes_are_unique() {
        let unique: HashSet<B256> = SIGNATURES.iter().map(|s| s.hash).collect();
        assert_eq!(unique.len(), SIGNATURES.len());
    }

    #[test]
    fn lookup_finds_seeded_signatures() {
        assert_eq!(
            lookup(&TRANSFER_TOPIC).map(|s| s.standard),
            Some(Standard::Erc721Transfer)
        );
        assert_eq!(
            lookup(&APPROVAL_FOR_ALL_TOPIC).map(|s| s.expected_topic_count),
            Some(3)
        );
        assert!(lookup(&B256::ZERO).is_none());
    }

    #[test]
    fn topic_counts_fit_in_a_log() {
        for sig in SIGNATURES {
            assert!(sig.expected_topic_count >= 1 && sig.expected_topic_count <= 4);
        }
    }
}
