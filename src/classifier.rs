// src/classifier.rs
use tracing::trace;

use crate::log::RawLog;
use crate::registry::{self, EventSignature};

/// Outcome of matching a log against the registry.
#[derive(Debug, Clone, Copy)]
pub enum Classification {
    Matched(&'static EventSignature),
    /// Hash is known but the topic count does not fit the registered shape.
    SignatureCollision {
        signature: &'static EventSignature,
        topic_count: usize,
    },
    /// Anonymous event or hash not in the registry.
    Unclassifiable,
}

pub fn classify(log: &RawLog) -> Classification {
    let Some(hash) = log.signature() else {
        return Classification::Unclassifiable;
    };

    let classification = match registry::lookup(hash) {
        None => Classification::Unclassifiable,
        Some(signature) if log.topics.len() != signature.expected_topic_count => {
            Classification::SignatureCollision {
                signature,
                topic_count: log.topics.len(),
            }
        }
        Some(signature) => Classification::Matched(signature),
    };

    trace!(log_index = log.log_index, ?classification, "classified log");
    classification
}
