// Path: crates/types/src/app/commit.rs

//! Ordering acknowledgements and per-peer commit notifications.

use serde::{Deserialize, Serialize};

/// The validation code peers report for a transaction that commits cleanly.
pub const VALID: &str = "VALID";

/// A notification from a peer that a transaction was written to its ledger.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CommitEvent {
    /// Name of the reporting peer.
    pub peer: String,
    /// The committed transaction.
    pub tx_id: String,
    /// Validation code assigned by the peer, `VALID` on success
    /// (e.g. `MVCC_READ_CONFLICT`, `ENDORSEMENT_POLICY_FAILURE` otherwise).
    pub validation_code: String,
    /// Block the transaction landed in.
    pub block_number: u64,
}

impl CommitEvent {
    /// Whether the peer accepted the transaction.
    pub fn is_valid(&self) -> bool {
        self.validation_code == VALID
    }
}

/// How one peer's commit listener settled.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CommitOutcome {
    /// The peer committed the transaction as `VALID`.
    Valid {
        /// Peer name.
        peer: String,
        /// Block the transaction landed in.
        block_number: u64,
    },
    /// The peer committed the transaction with a rejecting validation code.
    Invalid {
        /// Peer name.
        peer: String,
        /// The validation code reported.
        code: String,
    },
    /// No commit event arrived before the listener's timer fired.
    TimedOut {
        /// Peer name.
        peer: String,
        /// Peer address the listener was connected to.
        url: String,
    },
    /// The listener's event stream failed before an event arrived.
    Failed {
        /// Peer name.
        peer: String,
        /// Transport failure description.
        reason: String,
    },
}

impl CommitOutcome {
    /// Name of the peer this outcome belongs to.
    pub fn peer(&self) -> &str {
        match self {
            Self::Valid { peer, .. }
            | Self::Invalid { peer, .. }
            | Self::TimedOut { peer, .. }
            | Self::Failed { peer, .. } => peer,
        }
    }

    /// Whether the peer reported `VALID`.
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// A stable label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Valid { .. } => "valid",
            Self::Invalid { .. } => "invalid",
            Self::TimedOut { .. } => "timeout",
            Self::Failed { .. } => "failed",
        }
    }
}

/// The ordering service's verdict on a submitted transaction.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum OrdererStatus {
    /// The orderer accepted the transaction for sequencing.
    Success,
    /// The orderer rejected the transaction with the given status
    /// (e.g. `BAD_REQUEST`, `SERVICE_UNAVAILABLE`).
    Failure(String),
}

impl std::fmt::Display for OrdererStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => f.write_str("SUCCESS"),
            Self::Failure(status) => f.write_str(status),
        }
    }
}

/// Acknowledgement returned once per submitted transaction.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct OrdererAck {
    /// Ordering verdict.
    pub status: OrdererStatus,
}

impl OrdererAck {
    /// An accepting acknowledgement.
    pub fn success() -> Self {
        Self {
            status: OrdererStatus::Success,
        }
    }

    /// A rejecting acknowledgement.
    pub fn failure(status: impl Into<String>) -> Self {
        Self {
            status: OrdererStatus::Failure(status.into()),
        }
    }

    /// Whether the orderer accepted the transaction.
    pub fn is_success(&self) -> bool {
        self.status == OrdererStatus::Success
    }
}
