// Path: crates/types/src/app/result.rs

//! The terminal artifact every lifecycle operation hands back to its caller.

use crate::app::commit::CommitOutcome;
use crate::app::proposal::ResponseSet;
use crate::error::LifecycleError;
use serde::{Deserialize, Serialize};

/// Structured diagnostics attached to a lifecycle result.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum LifecyclePayload {
    /// The endorsement responses of a broadcast (install results, endorsement failures).
    Endorsements(ResponseSet),
    /// Every commit listener's outcome, in target order.
    Commits {
        /// The transaction the listeners waited for.
        tx_id: String,
        /// Per-peer outcomes.
        outcomes: Vec<CommitOutcome>,
    },
    /// The payload returned by the endorsing peer for an invoke.
    Response(Vec<u8>),
}

/// The outcome of one lifecycle operation. Never mutated after construction.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct LifecycleResult {
    /// Whether the operation fully succeeded.
    pub success: bool,
    /// Human-readable summary; embeds the first diagnosed cause on failure.
    pub message: String,
    /// Short cause label on failure, e.g. `EndorsementFailed` or `CommitTimeout:<peer>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    /// Optional structured diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<LifecyclePayload>,
}

impl LifecycleResult {
    /// A successful result.
    pub fn success(message: impl Into<String>, payload: Option<LifecyclePayload>) -> Self {
        Self {
            success: true,
            message: message.into(),
            cause: None,
            payload,
        }
    }

    /// A failed result describing `error`.
    pub fn failure(error: &LifecycleError, payload: Option<LifecyclePayload>) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            cause: Some(error.cause()),
            payload,
        }
    }

    /// The commit outcomes, when the payload carries them.
    pub fn commit_outcomes(&self) -> Option<&[CommitOutcome]> {
        match &self.payload {
            Some(LifecyclePayload::Commits { outcomes, .. }) => Some(outcomes),
            _ => None,
        }
    }
}
