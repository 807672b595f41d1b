// Path: crates/types/src/app/proposal.rs

//! Proposals and the endorsement responses peers return for them.

use crate::app::identity::TransactionId;
use crate::app::peer::Peer;
use crate::ENDORSEMENT_OK;
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// The kind of operation a proposal asks peers to endorse.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Install a chaincode package on the target peers.
    Install,
    /// Instantiate an installed chaincode on a channel.
    Instantiate,
    /// Upgrade an instantiated chaincode to a newly installed version.
    Upgrade,
    /// Invoke a function of an instantiated chaincode.
    Invoke,
}

impl OperationKind {
    /// A stable lowercase label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Install => "install",
            Self::Instantiate => "instantiate",
            Self::Upgrade => "upgrade",
            Self::Invoke => "invoke",
        }
    }

    /// Whether an endorsed proposal of this kind goes on to ordering.
    pub fn requires_ordering(&self) -> bool {
        !matches!(self, Self::Install)
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The runtime a chaincode is written for.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChaincodeType {
    /// Go chaincode.
    #[default]
    Golang,
    /// Node.js chaincode.
    Node,
    /// Java chaincode.
    Java,
}

/// Identifies a chaincode and version.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChaincodeSpec {
    /// Chaincode name.
    pub id: String,
    /// Chaincode version label.
    pub version: String,
    /// Source path of the package; only meaningful for install.
    pub path: Option<String>,
    /// Runtime of the chaincode.
    pub chaincode_type: ChaincodeType,
}

/// A request describing a chaincode operation, sent to peers for endorsement.
///
/// Built per call and discarded after use.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Proposal {
    /// Which operation is proposed.
    pub kind: OperationKind,
    /// The chaincode the operation applies to.
    pub chaincode: ChaincodeSpec,
    /// Target channel. `None` for install, which is channel-independent.
    pub channel: Option<String>,
    /// Constructor or invoked function name.
    pub function: String,
    /// Arguments passed to `function`.
    pub args: Vec<Vec<u8>>,
    /// Names of the peers the proposal is sent to.
    pub targets: Vec<String>,
    /// The transaction this proposal belongs to.
    pub tx_id: TransactionId,
}

/// A proposal together with its canonical bytes and the creator's signature over them.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SignedProposal {
    /// The decoded proposal.
    pub proposal: Proposal,
    /// Canonical SCALE encoding of `proposal`.
    pub proposal_bytes: Vec<u8>,
    /// Signature over `proposal_bytes`.
    pub signature: Vec<u8>,
}

/// A peer's signed answer to a proposal.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EndorsementResponse {
    /// Name of the responding peer.
    pub peer: String,
    /// Endorsement status; `200` means endorsed.
    pub status: u32,
    /// Status message returned alongside non-200 codes.
    #[serde(default)]
    pub message: String,
    /// Simulation result payload.
    pub payload: Vec<u8>,
    /// Endorser signature over the payload.
    pub signature: Vec<u8>,
}

impl EndorsementResponse {
    /// Whether the peer endorsed the proposal.
    pub fn is_endorsed(&self) -> bool {
        self.status == ENDORSEMENT_OK
    }
}

/// What came back from one target peer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum EndorsementOutcome {
    /// The peer answered (with any status).
    Response(EndorsementResponse),
    /// No response was obtained from the peer.
    Missing {
        /// Name of the peer.
        peer: String,
        /// Why no response was obtained.
        reason: String,
    },
}

impl EndorsementOutcome {
    /// Name of the peer this outcome belongs to.
    pub fn peer(&self) -> &str {
        match self {
            Self::Response(r) => &r.peer,
            Self::Missing { peer, .. } => peer,
        }
    }

    /// The endorsement status, or `None` when the response is missing.
    pub fn status(&self) -> Option<u32> {
        match self {
            Self::Response(r) => Some(r.status),
            Self::Missing { .. } => None,
        }
    }

    /// Whether this outcome is a `200` endorsement.
    pub fn is_endorsed(&self) -> bool {
        matches!(self, Self::Response(r) if r.is_endorsed())
    }
}

/// The endorsement outcomes of one broadcast, in target order.
///
/// Never empty. Evaluated once by the quorum evaluator, then read-only.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ResponseSet {
    outcomes: Vec<EndorsementOutcome>,
}

impl ResponseSet {
    /// Builds a response set, returning `None` for an empty outcome list.
    pub fn new(outcomes: Vec<EndorsementOutcome>) -> Option<Self> {
        if outcomes.is_empty() {
            None
        } else {
            Some(Self { outcomes })
        }
    }

    /// Outcomes in target order.
    pub fn outcomes(&self) -> &[EndorsementOutcome] {
        &self.outcomes
    }

    /// Number of outcomes.
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Always `false`; a response set is never empty.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// The outcome for a given peer.
    pub fn get(&self, peer: &str) -> Option<&EndorsementOutcome> {
        self.outcomes.iter().find(|o| o.peer() == peer)
    }

    /// All received responses, skipping missing ones.
    pub fn responses(&self) -> impl Iterator<Item = &EndorsementResponse> {
        self.outcomes.iter().filter_map(|o| match o {
            EndorsementOutcome::Response(r) => Some(r),
            EndorsementOutcome::Missing { .. } => None,
        })
    }
}

/// What the submitter forwards to the ordering service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct OrderingRequest {
    /// The transaction being ordered.
    pub tx_id: TransactionId,
    /// The endorsements collected for the proposal, in target order.
    pub endorsements: Vec<EndorsementResponse>,
    /// The endorsed proposal.
    pub proposal: SignedProposal,
}

/// Convenience for building a peer list in tests and profiles.
pub fn peer_names(peers: &[Peer]) -> Vec<String> {
    peers.iter().map(|p| p.name.clone()).collect()
}
