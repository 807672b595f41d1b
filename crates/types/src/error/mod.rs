// Path: crates/types/src/error/mod.rs
//! Core error types for ledgerops.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Errors raised by a ledger transport (peer or orderer connection).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The remote endpoint could not be reached.
    #[error("Endpoint unavailable: {0}")]
    Unavailable(String),
    /// The remote endpoint did not answer in time.
    #[error("Request timed out: {0}")]
    Timeout(String),
    /// The remote endpoint answered with an error.
    #[error("Request rejected: {0}")]
    Rejected(String),
    /// The remote answer could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
    /// The requested ledger object does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl ErrorCode for TransportError {
    fn code(&self) -> &'static str {
        match self {
            Self::Unavailable(_) => "TRANSPORT_UNAVAILABLE",
            Self::Timeout(_) => "TRANSPORT_TIMEOUT",
            Self::Rejected(_) => "TRANSPORT_REJECTED",
            Self::Decode(_) => "TRANSPORT_DECODE",
            Self::NotFound(_) => "TRANSPORT_NOT_FOUND",
        }
    }
}

/// Misconfiguration found while resolving identities or topology.
///
/// Unrecoverable for the current request; never retried.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No identity exists for the user in the organization's credential store.
    #[error("Identity '{user}' not found for organization '{org}'")]
    IdentityNotFound {
        /// Organization name.
        org: String,
        /// User name.
        user: String,
    },
    /// The organization is not part of the topology.
    #[error("Topology not found for organization '{0}'")]
    TopologyNotFound(String),
    /// The organization has no peers on the requested channel.
    #[error("Channel '{channel}' not found for organization '{org}'")]
    ChannelNotFound {
        /// Organization name.
        org: String,
        /// Channel name.
        channel: String,
    },
    /// A requested peer is not part of the organization's topology.
    #[error("Peer '{peer}' not found for organization '{org}'")]
    PeerNotFound {
        /// Organization name.
        org: String,
        /// Peer name.
        peer: String,
    },
    /// A peer was named more than once in a target list.
    #[error("Peer '{peer}' of organization '{org}' is targeted more than once")]
    DuplicatePeer {
        /// Organization name.
        org: String,
        /// Peer name.
        peer: String,
    },
    /// The topology profile itself is malformed.
    #[error("Invalid topology profile: {0}")]
    InvalidProfile(String),
}

impl ErrorCode for ResolveError {
    fn code(&self) -> &'static str {
        match self {
            Self::IdentityNotFound { .. } => "RESOLVE_IDENTITY_NOT_FOUND",
            Self::TopologyNotFound(_) => "RESOLVE_TOPOLOGY_NOT_FOUND",
            Self::ChannelNotFound { .. } => "RESOLVE_CHANNEL_NOT_FOUND",
            Self::PeerNotFound { .. } => "RESOLVE_PEER_NOT_FOUND",
            Self::DuplicatePeer { .. } => "RESOLVE_DUPLICATE_PEER",
            Self::InvalidProfile(_) => "RESOLVE_INVALID_PROFILE",
        }
    }
}

/// Errors from hashing, encoding and signing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// A hex field could not be decoded.
    #[error("Invalid hex in {field}: {reason}")]
    InvalidHex {
        /// Which field was malformed.
        field: &'static str,
        /// Decoder message.
        reason: String,
    },
    /// A recomputed hash does not match the recorded one.
    #[error("Hash mismatch. Expected {expected}, computed {computed}")]
    EncodingMismatch {
        /// The recorded hash.
        expected: String,
        /// The recomputed hash.
        computed: String,
    },
    /// Canonical encoding of a payload failed.
    #[error("Encoding failed: {0}")]
    Encoding(String),
    /// The signing identity could not produce a signature.
    #[error("Signing failed: {0}")]
    Signing(String),
}

impl ErrorCode for CryptoError {
    fn code(&self) -> &'static str {
        match self {
            Self::InvalidHex { .. } => "CRYPTO_INVALID_HEX",
            Self::EncodingMismatch { .. } => "CRYPTO_ENCODING_MISMATCH",
            Self::Encoding(_) => "CRYPTO_ENCODING_FAILED",
            Self::Signing(_) => "CRYPTO_SIGNING_FAILED",
        }
    }
}

/// One peer that did not endorse a proposal.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EndorsementFailure {
    /// Peer name.
    pub peer: String,
    /// The status the peer returned, `None` if no response arrived.
    pub status: Option<u32>,
    /// Status message or transport failure.
    pub message: String,
}

impl std::fmt::Display for EndorsementFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status {
            Some(status) => write!(f, "{} (status {}: {})", self.peer, status, self.message),
            None => write!(f, "{} (no response: {})", self.peer, self.message),
        }
    }
}

fn join_failures(failures: &[EndorsementFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors that end a chaincode lifecycle operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// At least one target peer did not return a `200` endorsement.
    #[error("Endorsement failed: {}", join_failures(.failures))]
    EndorsementFailed {
        /// Every non-endorsing peer, in target order.
        failures: Vec<EndorsementFailure>,
    },
    /// The ordering service rejected the transaction.
    #[error("Ordering failed with status {status}")]
    OrderingFailed {
        /// The orderer's status.
        status: String,
    },
    /// A peer did not report the commit before its listener timed out.
    #[error("Timed out waiting for commit on peer {peer}")]
    CommitTimeout {
        /// Peer name.
        peer: String,
    },
    /// A peer committed the transaction with a rejecting validation code.
    #[error("Transaction invalidated on peer {peer} with code {code}")]
    InvalidCommit {
        /// Peer name.
        peer: String,
        /// Validation code.
        code: String,
    },
    /// A commit listener could not be connected or its stream broke.
    #[error("Commit listener on peer {peer} failed: {reason}")]
    CommitListenerFailed {
        /// Peer name.
        peer: String,
        /// Failure description.
        reason: String,
    },
    /// The broadcast produced no responses at all.
    #[error("No target peers to send the proposal to")]
    EmptyResponseSet,
    /// The request itself is malformed.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    /// Identity or topology resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// Signing or encoding failed.
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl LifecycleError {
    /// The short cause label carried by a failed `LifecycleResult`.
    pub fn cause(&self) -> String {
        match self {
            Self::EndorsementFailed { .. } => "EndorsementFailed".to_string(),
            Self::OrderingFailed { status } => format!("OrderingFailed:{}", status),
            Self::CommitTimeout { peer } => format!("CommitTimeout:{}", peer),
            Self::InvalidCommit { peer, code } => format!("InvalidCommit:{}:{}", peer, code),
            Self::CommitListenerFailed { peer, .. } => format!("CommitListenerFailed:{}", peer),
            Self::EmptyResponseSet => "EmptyResponseSet".to_string(),
            Self::InvalidRequest(_) => "InvalidRequest".to_string(),
            Self::Resolve(_) => "ResolveFailed".to_string(),
            Self::Crypto(_) => "CryptoFailed".to_string(),
        }
    }
}

impl ErrorCode for LifecycleError {
    fn code(&self) -> &'static str {
        match self {
            Self::EndorsementFailed { .. } => "LIFECYCLE_ENDORSEMENT_FAILED",
            Self::OrderingFailed { .. } => "LIFECYCLE_ORDERING_FAILED",
            Self::CommitTimeout { .. } => "LIFECYCLE_COMMIT_TIMEOUT",
            Self::InvalidCommit { .. } => "LIFECYCLE_INVALID_COMMIT",
            Self::CommitListenerFailed { .. } => "LIFECYCLE_COMMIT_LISTENER_FAILED",
            Self::EmptyResponseSet => "LIFECYCLE_EMPTY_RESPONSE_SET",
            Self::InvalidRequest(_) => "LIFECYCLE_INVALID_REQUEST",
            Self::Resolve(e) => e.code(),
            Self::Crypto(e) => e.code(),
        }
    }
}

/// Errors from the read-only channel query engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Identity or topology resolution failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// The ledger read failed.
    #[error("Ledger read failed: {0}")]
    Transport(#[from] TransportError),
    /// A fetched block failed hash verification, or its fields were malformed.
    #[error("Block integrity check failed: {0}")]
    Integrity(#[from] CryptoError),
    /// The requested height is outside the chain.
    #[error("Invalid block height {0}")]
    InvalidHeight(u64),
}

impl ErrorCode for QueryError {
    fn code(&self) -> &'static str {
        match self {
            Self::Resolve(e) => e.code(),
            Self::Transport(e) => e.code(),
            Self::Integrity(e) => e.code(),
            Self::InvalidHeight(_) => "QUERY_INVALID_HEIGHT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endorsement_failure_message_names_every_peer() {
        let err = LifecycleError::EndorsementFailed {
            failures: vec![
                EndorsementFailure {
                    peer: "acme-peer1".into(),
                    status: Some(500),
                    message: "chaincode exists".into(),
                },
                EndorsementFailure {
                    peer: "acme-peer2".into(),
                    status: None,
                    message: "connection refused".into(),
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("acme-peer1 (status 500: chaincode exists)"));
        assert!(msg.contains("acme-peer2 (no response: connection refused)"));
        assert_eq!(err.cause(), "EndorsementFailed");
        assert_eq!(err.code(), "LIFECYCLE_ENDORSEMENT_FAILED");
    }

    #[test]
    fn causes_embed_the_peer() {
        let timeout = LifecycleError::CommitTimeout {
            peer: "budget-peer1".into(),
        };
        assert_eq!(timeout.cause(), "CommitTimeout:budget-peer1");

        let ordering = LifecycleError::OrderingFailed {
            status: "BAD_REQUEST".into(),
        };
        assert_eq!(ordering.cause(), "OrderingFailed:BAD_REQUEST");
    }

    #[test]
    fn wrapped_errors_keep_their_codes() {
        let err: LifecycleError = ResolveError::TopologyNotFound("zeta".into()).into();
        assert_eq!(err.code(), "RESOLVE_TOPOLOGY_NOT_FOUND");
        let err: QueryError = CryptoError::EncodingMismatch {
            expected: "aa".into(),
            computed: "bb".into(),
        }
        .into();
        assert_eq!(err.code(), "CRYPTO_ENCODING_MISMATCH");
    }
}
