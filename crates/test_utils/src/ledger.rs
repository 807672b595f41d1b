// Path: crates/test_utils/src/ledger.rs
//! A scripted, in-memory `LedgerTransport`.
//!
//! Each peer follows a `PeerScript` describing how it endorses and how its
//! commit listener settles. Every interaction is appended to an event log so
//! tests can assert ordering (e.g. that the orderer was contacted only after
//! every listener was armed).

use async_trait::async_trait;
use ledgerops_api::transport::{CommitListener, LedgerTransport};
use ledgerops_types::app::{
    Block, ChainInfo, ChaincodeInfo, CommitEvent, EndorsementResponse, Endpoint,
    GossipMembership, OrdererAck, OrderingRequest, Peer, ProcessedTransaction, SignedProposal,
    VALID,
};
use ledgerops_types::error::TransportError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// How a peer answers a proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndorseScript {
    /// Respond with the given status code.
    Status(u32),
    /// Fail the call with `TransportError::Unavailable`.
    Unreachable(String),
    /// Never answer.
    Hang,
}

/// How a peer's commit listener settles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitScript {
    /// Deliver a `VALID` event after the delay.
    Valid(Duration),
    /// Deliver an event with the given validation code.
    Invalid(String),
    /// Deliver an event for an unrelated transaction first, then a `VALID` one.
    ValidAfterForeign,
    /// Never deliver an event.
    Silent,
    /// Fail the event stream with the given reason.
    Broken(String),
    /// Refuse to register the listener.
    Unregistrable(String),
}

/// The complete behavior of one peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerScript {
    /// Endorsement behavior.
    pub endorse: EndorseScript,
    /// Commit listener behavior.
    pub commit: CommitScript,
    /// Payload returned with a `200` endorsement.
    pub payload: Vec<u8>,
}

impl Default for PeerScript {
    fn default() -> Self {
        Self {
            endorse: EndorseScript::Status(200),
            commit: CommitScript::Valid(Duration::ZERO),
            payload: b"endorsed".to_vec(),
        }
    }
}

impl PeerScript {
    /// A peer that endorses with `status`.
    pub fn status(status: u32) -> Self {
        Self {
            endorse: EndorseScript::Status(status),
            ..Self::default()
        }
    }

    /// A peer that endorses and whose listener settles per `commit`.
    pub fn commit(commit: CommitScript) -> Self {
        Self {
            commit,
            ..Self::default()
        }
    }
}

/// How the orderer answers a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrdererScript {
    /// Return the acknowledgement.
    Ack(OrdererAck),
    /// Fail the call with `TransportError::Unavailable`.
    Unreachable(String),
}

/// One interaction with the mock ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    /// A proposal reached a peer.
    ProposalSent {
        /// Peer name.
        peer: String,
        /// Transaction id of the proposal.
        tx_id: String,
    },
    /// A commit listener was armed on a peer.
    ListenerRegistered {
        /// Peer name.
        peer: String,
        /// Transaction id listened for.
        tx_id: String,
    },
    /// A transaction reached the orderer.
    OrdererSubmitted {
        /// Transaction id.
        tx_id: String,
    },
    /// A commit listener's connection was released.
    ListenerReleased {
        /// Peer name.
        peer: String,
    },
    /// A ledger read was served.
    Read {
        /// What was read.
        what: String,
    },
}

/// Ledger contents served by the read operations.
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    /// Blocks per channel, indexed by block number.
    pub blocks: HashMap<String, Vec<Block>>,
    /// Committed transactions by id.
    pub transactions: HashMap<String, ProcessedTransaction>,
    /// Instantiated chaincodes per channel.
    pub instantiated: HashMap<String, Vec<ChaincodeInfo>>,
    /// Installed chaincodes per peer.
    pub installed: HashMap<String, Vec<ChaincodeInfo>>,
    /// Joined channels per peer.
    pub joined: HashMap<String, Vec<String>>,
    /// Gossip membership per peer.
    pub gossip: HashMap<String, GossipMembership>,
}

#[derive(Debug, Default)]
struct Inner {
    events: Vec<LedgerEvent>,
    proposals: Vec<SignedProposal>,
    submissions: Vec<OrderingRequest>,
    armed: usize,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|e| e.into_inner())
}

/// The scripted ledger. Cheap to clone; clones share the event log.
#[derive(Debug, Clone)]
pub struct MockLedger {
    peers: Arc<HashMap<String, PeerScript>>,
    orderer: OrdererScript,
    required_listeners: Option<usize>,
    state: Arc<LedgerState>,
    inner: Arc<Mutex<Inner>>,
}

impl Default for MockLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLedger {
    /// A ledger where every peer endorses and commits `VALID` and the orderer accepts.
    pub fn new() -> Self {
        Self {
            peers: Arc::new(HashMap::new()),
            orderer: OrdererScript::Ack(OrdererAck::success()),
            required_listeners: None,
            state: Arc::new(LedgerState::default()),
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// Scripts the behavior of `peer`. Unscripted peers use `PeerScript::default()`.
    pub fn with_peer(mut self, peer: &str, script: PeerScript) -> Self {
        Arc::make_mut(&mut self.peers).insert(peer.to_string(), script);
        self
    }

    /// Scripts the orderer.
    pub fn with_orderer(mut self, script: OrdererScript) -> Self {
        self.orderer = script;
        self
    }

    /// Serves `state` from the read operations.
    pub fn with_state(mut self, state: LedgerState) -> Self {
        self.state = Arc::new(state);
        self
    }

    /// Makes the orderer reject any submission that arrives while fewer than
    /// `listeners` commit listeners are armed.
    pub fn strict(mut self, listeners: usize) -> Self {
        self.required_listeners = Some(listeners);
        self
    }

    /// Every interaction so far, in order.
    pub fn events(&self) -> Vec<LedgerEvent> {
        lock(&self.inner).events.clone()
    }

    /// Every proposal received so far.
    pub fn proposals(&self) -> Vec<SignedProposal> {
        lock(&self.inner).proposals.clone()
    }

    /// Every orderer submission so far.
    pub fn submissions(&self) -> Vec<OrderingRequest> {
        lock(&self.inner).submissions.clone()
    }

    /// How many times the listener on `peer` was released.
    pub fn release_count(&self, peer: &str) -> usize {
        lock(&self.inner)
            .events
            .iter()
            .filter(|e| matches!(e, LedgerEvent::ListenerReleased { peer: p } if p == peer))
            .count()
    }

    fn script(&self, peer: &str) -> PeerScript {
        self.peers.get(peer).cloned().unwrap_or_default()
    }

    fn record(&self, event: LedgerEvent) {
        lock(&self.inner).events.push(event);
    }

    fn read(&self, what: String) {
        self.record(LedgerEvent::Read { what });
    }

    fn chain(&self, channel: &str) -> Result<&Vec<Block>, TransportError> {
        self.state
            .blocks
            .get(channel)
            .ok_or_else(|| TransportError::NotFound(format!("channel {}", channel)))
    }
}

struct MockListener {
    peer: String,
    tx_id: String,
    script: CommitScript,
    foreign_sent: bool,
    block_number: u64,
    inner: Arc<Mutex<Inner>>,
}

impl MockListener {
    fn event(&self, tx_id: &str, code: &str) -> CommitEvent {
        CommitEvent {
            peer: self.peer.clone(),
            tx_id: tx_id.to_string(),
            validation_code: code.to_string(),
            block_number: self.block_number,
        }
    }
}

#[async_trait]
impl CommitListener for MockListener {
    async fn next_event(&mut self) -> Result<CommitEvent, TransportError> {
        match self.script.clone() {
            CommitScript::Valid(delay) => {
                tokio::time::sleep(delay).await;
                Ok(self.event(&self.tx_id, VALID))
            }
            CommitScript::Invalid(code) => Ok(self.event(&self.tx_id, &code)),
            CommitScript::ValidAfterForeign => {
                if self.foreign_sent {
                    Ok(self.event(&self.tx_id, VALID))
                } else {
                    self.foreign_sent = true;
                    Ok(self.event("unrelated-tx", "MVCC_READ_CONFLICT"))
                }
            }
            CommitScript::Silent => std::future::pending().await,
            CommitScript::Broken(reason) => Err(TransportError::Unavailable(reason)),
            CommitScript::Unregistrable(reason) => Err(TransportError::Unavailable(reason)),
        }
    }

    fn release(&mut self) {
        let mut inner = lock(&self.inner);
        inner.armed = inner.armed.saturating_sub(1);
        inner.events.push(LedgerEvent::ListenerReleased {
            peer: self.peer.clone(),
        });
    }
}

#[async_trait]
impl LedgerTransport for MockLedger {
    async fn send_proposal(
        &self,
        peer: &Peer,
        proposal: &SignedProposal,
    ) -> Result<EndorsementResponse, TransportError> {
        {
            let mut inner = lock(&self.inner);
            inner.events.push(LedgerEvent::ProposalSent {
                peer: peer.name.clone(),
                tx_id: proposal.proposal.tx_id.id.clone(),
            });
            inner.proposals.push(proposal.clone());
        }
        let script = self.script(&peer.name);
        match script.endorse {
            EndorseScript::Status(status) => Ok(EndorsementResponse {
                peer: peer.name.clone(),
                status,
                message: if status == 200 {
                    String::new()
                } else {
                    format!("simulation failed on {}", peer.name)
                },
                payload: if status == 200 { script.payload } else { Vec::new() },
                signature: format!("endorsed-by-{}", peer.name).into_bytes(),
            }),
            EndorseScript::Unreachable(reason) => Err(TransportError::Unavailable(reason)),
            EndorseScript::Hang => std::future::pending().await,
        }
    }

    async fn register_commit_listener(
        &self,
        peer: &Peer,
        tx_id: &str,
    ) -> Result<Box<dyn CommitListener>, TransportError> {
        let script = self.script(&peer.name).commit;
        if let CommitScript::Unregistrable(reason) = &script {
            return Err(TransportError::Unavailable(reason.clone()));
        }
        {
            let mut inner = lock(&self.inner);
            inner.armed += 1;
            inner.events.push(LedgerEvent::ListenerRegistered {
                peer: peer.name.clone(),
                tx_id: tx_id.to_string(),
            });
        }
        Ok(Box::new(MockListener {
            peer: peer.name.clone(),
            tx_id: tx_id.to_string(),
            script,
            foreign_sent: false,
            block_number: 7,
            inner: self.inner.clone(),
        }))
    }

    async fn submit_to_orderer(
        &self,
        _orderer: &Endpoint,
        request: &OrderingRequest,
    ) -> Result<OrdererAck, TransportError> {
        {
            let mut inner = lock(&self.inner);
            inner.events.push(LedgerEvent::OrdererSubmitted {
                tx_id: request.tx_id.id.clone(),
            });
            inner.submissions.push(request.clone());
            if let Some(required) = self.required_listeners {
                if inner.armed < required {
                    return Err(TransportError::Rejected(format!(
                        "submission arrived with {} of {} listeners armed",
                        inner.armed, required
                    )));
                }
            }
        }
        match &self.orderer {
            OrdererScript::Ack(ack) => Ok(ack.clone()),
            OrdererScript::Unreachable(reason) => Err(TransportError::Unavailable(reason.clone())),
        }
    }

    async fn read_chain_info(
        &self,
        _peer: &Peer,
        channel: &str,
    ) -> Result<ChainInfo, TransportError> {
        self.read(format!("chain_info:{}", channel));
        let chain = self.chain(channel)?;
        let hash_of = |idx: Option<usize>| {
            idx.and_then(|i| chain.get(i))
                .and_then(|b| ledgerops_crypto::block_header_hash(&b.header).ok())
                .unwrap_or_default()
        };
        Ok(ChainInfo {
            height: chain.len() as u64,
            current_block_hash: hash_of(chain.len().checked_sub(1)),
            previous_block_hash: hash_of(chain.len().checked_sub(2)),
        })
    }

    async fn read_block(
        &self,
        _peer: &Peer,
        channel: &str,
        number: u64,
    ) -> Result<Block, TransportError> {
        self.read(format!("block:{}:{}", channel, number));
        usize::try_from(number)
            .ok()
            .and_then(|n| self.chain(channel).ok()?.get(n).cloned())
            .ok_or_else(|| TransportError::NotFound(format!("block {}", number)))
    }

    async fn read_transaction(
        &self,
        _peer: &Peer,
        _channel: &str,
        tx_id: &str,
    ) -> Result<ProcessedTransaction, TransportError> {
        self.read(format!("transaction:{}", tx_id));
        self.state
            .transactions
            .get(tx_id)
            .cloned()
            .ok_or_else(|| TransportError::NotFound(format!("transaction {}", tx_id)))
    }

    async fn read_instantiated_chaincodes(
        &self,
        _peer: &Peer,
        channel: &str,
    ) -> Result<Vec<ChaincodeInfo>, TransportError> {
        self.read(format!("instantiated:{}", channel));
        Ok(self
            .state
            .instantiated
            .get(channel)
            .cloned()
            .unwrap_or_default())
    }

    async fn read_installed_chaincodes(
        &self,
        peer: &Peer,
    ) -> Result<Vec<ChaincodeInfo>, TransportError> {
        self.read(format!("installed:{}", peer.name));
        Ok(self
            .state
            .installed
            .get(&peer.name)
            .cloned()
            .unwrap_or_default())
    }

    async fn read_joined_channels(&self, peer: &Peer) -> Result<Vec<String>, TransportError> {
        self.read(format!("channels:{}", peer.name));
        Ok(self.state.joined.get(&peer.name).cloned().unwrap_or_default())
    }

    async fn read_gossip_membership(
        &self,
        peer: &Peer,
    ) -> Result<GossipMembership, TransportError> {
        self.read(format!("gossip:{}", peer.name));
        Ok(self.state.gossip.get(&peer.name).cloned().unwrap_or_default())
    }
}
