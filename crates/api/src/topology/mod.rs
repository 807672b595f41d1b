// Path: crates/api/src/topology/mod.rs

//! Defines the `TopologyResolver` trait for organization → endpoint lookups.

use async_trait::async_trait;
use ledgerops_types::app::{Peer, Topology};
use ledgerops_types::error::ResolveError;
use std::collections::HashSet;
use std::fmt::Debug;

/// Resolves an organization (and optionally a channel) to its peers and orderer.
#[async_trait]
pub trait TopologyResolver: Send + Sync + Debug {
    /// Returns the organization's peers, narrowed to `channel` when given, and
    /// its orderer endpoint.
    async fn resolve_topology(
        &self,
        org: &str,
        channel: Option<&str>,
    ) -> Result<Topology, ResolveError>;
}

/// Selects the peers named in `names` from `topology`, preserving the caller's order.
///
/// An empty `names` selects every peer of the topology. Each peer may be named
/// at most once: a proposal and a commit listener exist once per peer.
pub fn select_peers(topology: &Topology, names: &[String]) -> Result<Vec<Peer>, ResolveError> {
    if names.is_empty() {
        return Ok(topology.peers.clone());
    }
    let mut seen = HashSet::with_capacity(names.len());
    let mut selected = Vec::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_str()) {
            return Err(ResolveError::DuplicatePeer {
                org: topology.organization.clone(),
                peer: name.clone(),
            });
        }
        let peer = topology
            .peer(name)
            .ok_or_else(|| ResolveError::PeerNotFound {
                org: topology.organization.clone(),
                peer: name.clone(),
            })?;
        selected.push(peer.clone());
    }
    log::debug!(
        "Selected {} of {} peers for organization '{}'",
        selected.len(),
        topology.peers.len(),
        topology.organization
    );
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerops_types::app::Endpoint;

    fn topology() -> Topology {
        let peer = |name: &str| Peer {
            name: name.into(),
            url: format!("grpc://{}:7051", name),
            organization: "acme".into(),
        };
        Topology {
            organization: "acme".into(),
            msp_id: "AcmeMSP".into(),
            channel: None,
            peers: vec![peer("p1"), peer("p2"), peer("p3")],
            orderer: Endpoint {
                name: "orderer".into(),
                url: "grpc://orderer:7050".into(),
            },
        }
    }

    #[test]
    fn empty_selection_means_every_peer() {
        let peers = select_peers(&topology(), &[]).unwrap();
        assert_eq!(peers.len(), 3);
    }

    #[test]
    fn selection_keeps_caller_order() {
        let peers = select_peers(&topology(), &["p3".into(), "p1".into()]).unwrap();
        let names: Vec<_> = peers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["p3", "p1"]);
    }

    #[test]
    fn repeated_peer_is_rejected() {
        let names = ["p2".to_string(), "p1".to_string(), "p2".to_string()];
        let err = select_peers(&topology(), &names).unwrap_err();
        assert_eq!(
            err,
            ResolveError::DuplicatePeer {
                org: "acme".into(),
                peer: "p2".into()
            }
        );
    }

    #[test]
    fn unknown_peer_is_reported() {
        let err = select_peers(&topology(), &["p9".into()]).unwrap_err();
        assert_eq!(
            err,
            ResolveError::PeerNotFound {
                org: "acme".into(),
                peer: "p9".into()
            }
        );
    }
}
