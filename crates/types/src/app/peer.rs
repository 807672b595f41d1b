// Path: crates/types/src/app/peer.rs

//! Network endpoints resolved from the topology.

use serde::{Deserialize, Serialize};

/// A ledger peer. Shared, read-only reference resolved from the topology.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Peer {
    /// Peer name, e.g. `acme-peer1.acme.com`.
    pub name: String,
    /// gRPC URL of the peer, e.g. `grpc://localhost:7051`.
    pub url: String,
    /// Owning organization.
    pub organization: String,
}

impl std::fmt::Display for Peer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The ordering service endpoint.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    /// Orderer name.
    pub name: String,
    /// gRPC URL of the orderer.
    pub url: String,
}

/// The peers and orderer an organization reaches, optionally narrowed to a channel.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    /// The organization this topology was resolved for.
    pub organization: String,
    /// The MSP identifier of the organization.
    pub msp_id: String,
    /// The channel the peer set was narrowed to, if any.
    pub channel: Option<String>,
    /// Peers of the organization, in profile order.
    pub peers: Vec<Peer>,
    /// The ordering service endpoint.
    pub orderer: Endpoint,
}

impl Topology {
    /// Looks up a peer by name.
    pub fn peer(&self, name: &str) -> Option<&Peer> {
        self.peers.iter().find(|p| p.name == name)
    }
}
