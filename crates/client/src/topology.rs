// Path: crates/client/src/topology.rs
//! A `TopologyResolver` backed by a static connection profile.

use async_trait::async_trait;
use ledgerops_api::topology::TopologyResolver;
use ledgerops_types::app::{Endpoint, Peer, Topology};
use ledgerops_types::config::{OrganizationProfile, TopologyProfile};
use ledgerops_types::error::ResolveError;
use std::path::Path;

/// Resolves organizations and channels from a [`TopologyProfile`] loaded once.
#[derive(Debug, Clone)]
pub struct StaticTopology {
    profile: TopologyProfile,
}

impl StaticTopology {
    /// Wraps an already-parsed profile.
    pub fn new(profile: TopologyProfile) -> Self {
        Self { profile }
    }

    /// Parses a TOML profile.
    pub fn from_toml_str(raw: &str) -> Result<Self, ResolveError> {
        toml::from_str(raw)
            .map(Self::new)
            .map_err(|e| ResolveError::InvalidProfile(e.to_string()))
    }

    /// Reads and parses a TOML profile from disk.
    pub fn from_file(path: &Path) -> Result<Self, ResolveError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ResolveError::InvalidProfile(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&raw)
    }

    /// The underlying profile.
    pub fn profile(&self) -> &TopologyProfile {
        &self.profile
    }

    /// Resolves synchronously; the async trait method delegates here.
    pub fn resolve(&self, org: &str, channel: Option<&str>) -> Result<Topology, ResolveError> {
        let profile = self
            .profile
            .organization(org)
            .ok_or_else(|| ResolveError::TopologyNotFound(org.to_string()))?;
        let peers = match channel {
            None => profile.peers.iter().map(|p| to_peer(profile, p)).collect(),
            Some(name) => channel_peers(profile, name)?,
        };
        Ok(Topology {
            organization: profile.name.clone(),
            msp_id: profile.msp_id.clone(),
            channel: channel.map(str::to_string),
            peers,
            orderer: Endpoint {
                name: profile.orderer.name.clone(),
                url: profile.orderer.url.clone(),
            },
        })
    }
}

fn to_peer(org: &OrganizationProfile, peer: &ledgerops_types::config::PeerProfile) -> Peer {
    Peer {
        name: peer.name.clone(),
        url: peer.url.clone(),
        organization: org.name.clone(),
    }
}

fn channel_peers(org: &OrganizationProfile, channel: &str) -> Result<Vec<Peer>, ResolveError> {
    let joined = org
        .channels
        .iter()
        .find(|c| c.name == channel)
        .ok_or_else(|| ResolveError::ChannelNotFound {
            org: org.name.clone(),
            channel: channel.to_string(),
        })?;
    if joined.peers.is_empty() {
        return Ok(org.peers.iter().map(|p| to_peer(org, p)).collect());
    }
    joined
        .peers
        .iter()
        .map(|name| {
            org.peers
                .iter()
                .find(|p| &p.name == name)
                .map(|p| to_peer(org, p))
                .ok_or_else(|| {
                    ResolveError::InvalidProfile(format!(
                        "channel '{}' of '{}' lists unknown peer '{}'",
                        channel, org.name, name
                    ))
                })
        })
        .collect()
}

#[async_trait]
impl TopologyResolver for StaticTopology {
    async fn resolve_topology(
        &self,
        org: &str,
        channel: Option<&str>,
    ) -> Result<Topology, ResolveError> {
        self.resolve(org, channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerops_test_utils::fixtures::{TestFixtures, ACME_PEERS, BUDGET_PEERS, CHANNEL};

    fn topology() -> StaticTopology {
        StaticTopology::new(TestFixtures::topology_profile())
    }

    #[test]
    fn channel_without_peer_list_includes_every_peer() {
        let acme = topology().resolve("acme", Some(CHANNEL)).unwrap();
        let names: Vec<_> = acme.peers.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ACME_PEERS);
        assert_eq!(acme.msp_id, "AcmeMSP");
        assert_eq!(acme.channel.as_deref(), Some(CHANNEL));
    }

    #[test]
    fn channel_peer_list_narrows_the_topology() {
        let budget = topology().resolve("budget", Some(CHANNEL)).unwrap();
        assert_eq!(budget.peers.len(), 1);
        assert_eq!(budget.peers[0].name, BUDGET_PEERS[0]);

        let all = topology().resolve("budget", None).unwrap();
        assert_eq!(all.peers.len(), 2);
    }

    #[test]
    fn unknown_org_and_channel_are_typed_errors() {
        assert_eq!(
            topology().resolve("zeta", None).unwrap_err(),
            ResolveError::TopologyNotFound("zeta".into())
        );
        assert!(matches!(
            topology().resolve("acme", Some("cargochannel")).unwrap_err(),
            ResolveError::ChannelNotFound { .. }
        ));
    }

    #[test]
    fn malformed_profile_is_rejected() {
        let err = StaticTopology::from_toml_str("organizations = 3").unwrap_err();
        assert!(matches!(err, ResolveError::InvalidProfile(_)));
    }
}
