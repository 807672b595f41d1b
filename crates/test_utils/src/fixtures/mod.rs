// Path: crates/test_utils/src/fixtures/mod.rs
//! Test fixtures for reproducible tests

use crate::identity::StaticIdentityProvider;
use crate::ledger::LedgerState;
use ledgerops_crypto::block_header_hash;
use ledgerops_types::app::{
    Block, BlockHeader, BlockTransaction, ChaincodeInfo, GossipMembership, ProcessedTransaction,
    VALID,
};
use ledgerops_types::config::{
    ChannelProfile, OrdererProfile, OrganizationProfile, PeerProfile, TopologyProfile,
};
use ledgerops_types::error::CryptoError;

/// The channel every fixture organization participates in.
pub const CHANNEL: &str = "airlinechannel";

/// Peers of the `acme` organization, in profile order.
pub const ACME_PEERS: [&str; 3] = [
    "acme-peer1.acme.com",
    "acme-peer2.acme.com",
    "acme-peer3.acme.com",
];

/// Peers of the `budget` organization, in profile order.
pub const BUDGET_PEERS: [&str; 2] = ["budget-peer1.budget.com", "budget-peer2.budget.com"];

/// Predefined test fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// A two-organization network. `acme` has three peers, all on
    /// [`CHANNEL`]; `budget` has two peers, only the first on [`CHANNEL`].
    pub fn topology_profile() -> TopologyProfile {
        let org = |name: &str, msp_id: &str, peers: &[&str], channel_peers: Vec<String>, port: u32| {
            OrganizationProfile {
                name: name.to_string(),
                msp_id: msp_id.to_string(),
                peers: peers
                    .iter()
                    .enumerate()
                    .map(|(i, p)| PeerProfile {
                        name: p.to_string(),
                        url: format!("grpc://localhost:{}", port + 1000 * i as u32),
                    })
                    .collect(),
                orderer: OrdererProfile {
                    name: format!("orderer.{}.com", name),
                    url: "grpc://localhost:7050".to_string(),
                },
                channels: vec![ChannelProfile {
                    name: CHANNEL.to_string(),
                    peers: channel_peers,
                }],
            }
        };
        TopologyProfile {
            organizations: vec![
                org("acme", "AcmeMSP", &ACME_PEERS, Vec::new(), 7051),
                org(
                    "budget",
                    "BudgetMSP",
                    &BUDGET_PEERS,
                    vec![BUDGET_PEERS[0].to_string()],
                    9051,
                ),
            ],
        }
    }

    /// Admin identities for both fixture organizations.
    pub fn identities() -> StaticIdentityProvider {
        StaticIdentityProvider::new()
            .with_identity("acme", "Admin", "AcmeMSP")
            .with_identity("budget", "Admin", "BudgetMSP")
    }

    /// `count` hash-chained blocks. Block `n` carries one transaction `tx-n`.
    pub fn chain(count: u64) -> Result<Vec<Block>, CryptoError> {
        let mut blocks: Vec<Block> = Vec::new();
        for number in 0..count {
            let previous_hash = match blocks.last() {
                Some(prev) => block_header_hash(&prev.header)?,
                None => String::new(),
            };
            blocks.push(Block {
                header: BlockHeader {
                    number,
                    previous_hash,
                    data_hash: hex::encode([number as u8; 32]),
                },
                transactions: vec![Self::transaction(number)],
            });
        }
        Ok(blocks)
    }

    fn transaction(number: u64) -> BlockTransaction {
        BlockTransaction {
            tx_id: format!("tx-{}", number),
            channel_id: CHANNEL.to_string(),
            creator_msp_id: if number == 0 { "OrdererMSP" } else { "AcmeMSP" }.to_string(),
            timestamp: format!("2024-01-01T00:00:{:02}Z", number % 60),
            type_label: if number == 0 { "CONFIG" } else { "ENDORSER_TRANSACTION" }.to_string(),
        }
    }

    /// Ledger contents for `acme-peer1`: a `count`-block chain on [`CHANNEL`],
    /// its transactions, one instantiated chaincode and peer metadata.
    pub fn ledger_state(count: u64) -> Result<LedgerState, CryptoError> {
        let blocks = Self::chain(count)?;
        let mut state = LedgerState::default();
        for block in &blocks {
            for tx in &block.transactions {
                state.transactions.insert(
                    tx.tx_id.clone(),
                    ProcessedTransaction {
                        transaction: tx.clone(),
                        validation_code: VALID.to_string(),
                    },
                );
            }
        }
        state.blocks.insert(CHANNEL.to_string(), blocks);
        let airline = ChaincodeInfo {
            name: "airline".to_string(),
            version: "v1".to_string(),
        };
        state
            .instantiated
            .insert(CHANNEL.to_string(), vec![airline.clone()]);
        state
            .installed
            .insert(ACME_PEERS[0].to_string(), vec![airline]);
        state
            .joined
            .insert(ACME_PEERS[0].to_string(), vec![CHANNEL.to_string()]);
        state.gossip.insert(
            ACME_PEERS[0].to_string(),
            GossipMembership {
                local_peers: vec![
                    (
                        "AcmeMSP".to_string(),
                        vec![
                            "acme-peer2.acme.com:8051".to_string(),
                            "acme-peer3.acme.com:9051".to_string(),
                        ],
                    ),
                    (
                        "BudgetMSP".to_string(),
                        vec!["budget-peer1.budget.com:9051".to_string()],
                    ),
                ],
            },
        );
        Ok(state)
    }
}
