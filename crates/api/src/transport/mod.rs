// Path: crates/api/src/transport/mod.rs

//! Defines the ledger transport: how the core reaches peers and the orderer.

use async_trait::async_trait;
use ledgerops_types::app::{
    Block, ChainInfo, ChaincodeInfo, CommitEvent, EndorsementResponse, Endpoint,
    GossipMembership, OrdererAck, OrderingRequest, Peer, ProcessedTransaction, SignedProposal,
};
use ledgerops_types::error::TransportError;
use std::fmt::Debug;

/// A registered, connected listener for one transaction's commit on one peer.
///
/// The listener owns a connection to the peer's event service. It is armed
/// (registered and connected) by the time `LedgerTransport::register_commit_listener`
/// returns, so events emitted after that point are never missed.
#[async_trait]
pub trait CommitListener: Send {
    /// Waits for the next commit event delivered to this listener.
    ///
    /// Implementations may deliver events for other transactions seen on the
    /// same stream; callers filter by transaction id.
    async fn next_event(&mut self) -> Result<CommitEvent, TransportError>;

    /// Releases the listener's connection. Callers invoke this exactly once.
    ///
    /// Synchronous so that it can run from `Drop` when an operation is
    /// cancelled while its listeners are still waiting.
    fn release(&mut self);
}

/// A client for the ledger network: endorsement, ordering, commit events and reads.
///
/// Implementations hold no per-operation state; every call is independent.
#[async_trait]
pub trait LedgerTransport: Send + Sync + Debug {
    /// Sends a signed proposal to one peer and returns its endorsement response.
    async fn send_proposal(
        &self,
        peer: &Peer,
        proposal: &SignedProposal,
    ) -> Result<EndorsementResponse, TransportError>;

    /// Connects to `peer`'s event service and registers interest in `tx_id`.
    async fn register_commit_listener(
        &self,
        peer: &Peer,
        tx_id: &str,
    ) -> Result<Box<dyn CommitListener>, TransportError>;

    /// Submits an endorsed transaction to the ordering service.
    async fn submit_to_orderer(
        &self,
        orderer: &Endpoint,
        request: &OrderingRequest,
    ) -> Result<OrdererAck, TransportError>;

    /// Reads the chain summary of `channel` from `peer`.
    async fn read_chain_info(&self, peer: &Peer, channel: &str)
        -> Result<ChainInfo, TransportError>;

    /// Reads block `number` of `channel` from `peer`.
    async fn read_block(
        &self,
        peer: &Peer,
        channel: &str,
        number: u64,
    ) -> Result<Block, TransportError>;

    /// Reads a committed transaction by id.
    async fn read_transaction(
        &self,
        peer: &Peer,
        channel: &str,
        tx_id: &str,
    ) -> Result<ProcessedTransaction, TransportError>;

    /// Lists the chaincodes instantiated on `channel`.
    async fn read_instantiated_chaincodes(
        &self,
        peer: &Peer,
        channel: &str,
    ) -> Result<Vec<ChaincodeInfo>, TransportError>;

    /// Lists the chaincodes installed on `peer`.
    async fn read_installed_chaincodes(
        &self,
        peer: &Peer,
    ) -> Result<Vec<ChaincodeInfo>, TransportError>;

    /// Lists the channels `peer` has joined.
    async fn read_joined_channels(&self, peer: &Peer) -> Result<Vec<String>, TransportError>;

    /// Reads `peer`'s view of the gossip network.
    async fn read_gossip_membership(&self, peer: &Peer)
        -> Result<GossipMembership, TransportError>;
}
