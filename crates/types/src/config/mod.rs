// Path: crates/types/src/config/mod.rs

//! Configuration structures for the orchestrator and the topology profile.
use serde::{Deserialize, Serialize};

/// Runtime settings of the lifecycle orchestrator and query engine.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// The user whose identity signs proposals for every organization.
    #[serde(default = "default_user")]
    pub user: String,
    /// How long each peer's commit listener waits for its event.
    #[serde(default = "default_commit_timeout_ms")]
    pub commit_timeout_ms: u64,
    /// How long a single peer may take to answer a proposal.
    #[serde(default = "default_proposal_timeout_ms")]
    pub proposal_timeout_ms: u64,
    /// Reuse resolved identity/topology across calls until invalidated.
    #[serde(default)]
    pub cache_contexts: bool,
}

fn default_user() -> String {
    "Admin".to_string()
}
fn default_commit_timeout_ms() -> u64 {
    60_000
}
fn default_proposal_timeout_ms() -> u64 {
    45_000
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
            commit_timeout_ms: default_commit_timeout_ms(),
            proposal_timeout_ms: default_proposal_timeout_ms(),
            cache_contexts: false,
        }
    }
}

/// A peer entry of an organization profile.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PeerProfile {
    /// Peer name.
    pub name: String,
    /// Peer URL.
    pub url: String,
}

/// The orderer an organization submits to.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OrdererProfile {
    /// Orderer name.
    pub name: String,
    /// Orderer URL.
    pub url: String,
}

/// A channel the organization participates in.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ChannelProfile {
    /// Channel name.
    pub name: String,
    /// Names of the organization's peers joined to the channel.
    /// Empty means every peer of the organization.
    #[serde(default)]
    pub peers: Vec<String>,
}

/// One organization of the network.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OrganizationProfile {
    /// Organization name (e.g. `acme`).
    pub name: String,
    /// MSP identifier (e.g. `AcmeMSP`).
    pub msp_id: String,
    /// Peers owned by the organization.
    pub peers: Vec<PeerProfile>,
    /// The orderer the organization submits to.
    pub orderer: OrdererProfile,
    /// Channels the organization participates in.
    #[serde(default)]
    pub channels: Vec<ChannelProfile>,
}

/// The network connection profile: every organization, its peers, orderer and channels.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct TopologyProfile {
    /// Organizations of the network.
    #[serde(default)]
    pub organizations: Vec<OrganizationProfile>,
}

impl TopologyProfile {
    /// Looks up an organization by name.
    pub fn organization(&self, name: &str) -> Option<&OrganizationProfile> {
        self.organizations.iter().find(|o| o.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orchestrator_defaults_apply_to_missing_fields() {
        let cfg: OrchestratorConfig = toml::from_str("user = \"User1\"").unwrap();
        assert_eq!(cfg.user, "User1");
        assert_eq!(cfg.commit_timeout_ms, 60_000);
        assert_eq!(cfg.proposal_timeout_ms, 45_000);
        assert!(!cfg.cache_contexts);

        let empty: OrchestratorConfig = toml::from_str("").unwrap();
        assert_eq!(empty, OrchestratorConfig::default());
    }

    #[test]
    fn topology_profile_parses_from_toml() {
        let raw = r#"
            [[organizations]]
            name = "acme"
            msp_id = "AcmeMSP"
            orderer = { name = "orderer.acme.com", url = "grpc://localhost:7050" }
            peers = [
                { name = "acme-peer1.acme.com", url = "grpc://localhost:7051" },
                { name = "acme-peer2.acme.com", url = "grpc://localhost:8051" },
            ]

            [[organizations.channels]]
            name = "airlinechannel"
            peers = ["acme-peer1.acme.com"]
        "#;
        let profile: TopologyProfile = toml::from_str(raw).unwrap();
        let acme = profile.organization("acme").unwrap();
        assert_eq!(acme.peers.len(), 2);
        assert_eq!(acme.channels[0].peers, vec!["acme-peer1.acme.com"]);
        assert!(profile.organization("budget").is_none());
    }
}
