// Path: crates/types/src/app/block.rs

//! Ledger read models: block headers, chain info and the flattened views the
//! channel query engine returns.

use serde::{Deserialize, Serialize};

/// The hashed part of a block. Immutable once fetched.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BlockHeader {
    /// Block number, starting at 0 for the genesis block.
    pub number: u64,
    /// Hex-encoded header hash of the previous block (empty for genesis).
    pub previous_hash: String,
    /// Hex-encoded hash of the block's data section.
    pub data_hash: String,
}

/// One transaction envelope inside a block.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BlockTransaction {
    /// Transaction id from the channel header.
    pub tx_id: String,
    /// Channel id from the channel header.
    pub channel_id: String,
    /// MSP id of the creator from the signature header.
    pub creator_msp_id: String,
    /// Channel header timestamp (RFC 3339).
    pub timestamp: String,
    /// Header type label, e.g. `ENDORSER_TRANSACTION` or `CONFIG`.
    pub type_label: String,
}

/// A block as read from a peer's ledger.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// The block header.
    pub header: BlockHeader,
    /// Transactions in block order.
    pub transactions: Vec<BlockTransaction>,
}

/// Chain summary returned by a peer.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChainInfo {
    /// Number of blocks in the chain.
    pub height: u64,
    /// Hex header hash of the latest block.
    pub current_block_hash: String,
    /// Hex header hash of the block before the latest.
    pub previous_block_hash: String,
}

/// A transaction looked up by id, as returned by the ledger.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ProcessedTransaction {
    /// The transaction envelope's header fields.
    pub transaction: BlockTransaction,
    /// Validation code recorded when the transaction committed.
    pub validation_code: String,
}

/// A chaincode name/version pair.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChaincodeInfo {
    /// Chaincode name.
    pub name: String,
    /// Chaincode version.
    pub version: String,
}

/// The height of a channel's chain.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockHeight {
    /// Number of blocks in the chain.
    pub block_height: u64,
}

/// Hashes identifying a channel's genesis block.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct GenesisInfo {
    /// Data hash recorded in the genesis header.
    pub data_hash: String,
    /// Recomputed header hash of the genesis block.
    pub block_hash: String,
}

/// One row of a block's flattened transaction list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TransactionSummary {
    /// Transaction id.
    pub transaction_id: String,
    /// MSP id of the organization that created the transaction.
    pub creator_msp_id: String,
}

/// Block metadata plus a flattened transaction list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BlockInfo {
    /// Block number.
    pub block_number: u64,
    /// Recomputed header hash.
    pub block_hash: String,
    /// Header hash of the previous block, as recorded.
    pub previous_hash: String,
    /// Data hash, as recorded.
    pub data_hash: String,
    /// Number of transactions in the block.
    pub transactions_count: usize,
    /// Transactions in block order.
    pub transactions: Vec<TransactionSummary>,
}

/// A transaction looked up by id.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct TransactionInfo {
    /// Transaction id.
    pub tx_id: String,
    /// Channel the transaction belongs to.
    pub channel_id: String,
    /// Channel header timestamp.
    pub timestamp: String,
    /// Header type label.
    pub type_label: String,
}

/// Result of checking a block against its predecessor.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BlockVerification {
    /// Verified block number.
    pub block_number: u64,
    /// Recomputed header hash of the verified block.
    pub block_hash: String,
    /// Recomputed header hash of the predecessor, if there is one.
    pub predecessor_hash: Option<String>,
}

/// What a peer reports about itself.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PeerInfo {
    /// Peer name.
    pub name: String,
    /// Peer URL.
    pub url: String,
    /// Channels the peer has joined.
    pub channels_joined: Vec<String>,
    /// Chaincodes installed on the peer.
    pub chaincodes_installed: Vec<ChaincodeInfo>,
    /// Gossip endpoints the peer is connected to, one per organization.
    pub gossip_network: Vec<String>,
}

/// Gossip membership as reported by a peer, grouped by MSP id.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct GossipMembership {
    /// `(msp_id, endpoints)` pairs in MSP id order.
    pub local_peers: Vec<(String, Vec<String>)>,
}
