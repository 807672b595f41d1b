// Path: crates/client/src/queries/peer.rs
//! Peer introspection.

use super::{record, ChannelQueries};
use ledgerops_types::app::PeerInfo;
use ledgerops_types::error::{QueryError, ResolveError};

impl ChannelQueries {
    /// Channels, installed chaincodes and gossip view of one peer of `org`.
    pub async fn peer_info(&self, org: &str, peer_name: &str) -> Result<PeerInfo, QueryError> {
        let result = async {
            let ctx = self.contexts.resolve(org, &self.user, None).await?;
            let peer = ctx
                .topology
                .peer(peer_name)
                .cloned()
                .ok_or_else(|| ResolveError::PeerNotFound {
                    org: org.to_string(),
                    peer: peer_name.to_string(),
                })?;
            let (channels, installed, gossip) = tokio::join!(
                self.transport.read_joined_channels(&peer),
                self.transport.read_installed_chaincodes(&peer),
                self.transport.read_gossip_membership(&peer),
            );
            // One representative endpoint per organization.
            let gossip_network = gossip?
                .local_peers
                .into_iter()
                .filter_map(|(_, endpoints)| endpoints.into_iter().next())
                .collect();
            Ok::<_, QueryError>(PeerInfo {
                name: peer.name,
                url: peer.url,
                channels_joined: channels?,
                chaincodes_installed: installed?,
                gossip_network,
            })
        }
        .await;
        record("peer_info", result)
    }
}
