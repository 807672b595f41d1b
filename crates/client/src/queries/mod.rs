// Path: crates/client/src/queries/mod.rs
//! The channel query engine.
//!
//! Read-only ledger introspection. Each call resolves identity and topology
//! for its scope, then reads from a single peer. Blocks come back with their
//! header hash recomputed locally.

mod peer;

use crate::context::{CallContext, ContextResolver};
use ledgerops_api::transport::LedgerTransport;
use ledgerops_crypto::{block_header_hash, verify_block_header, verify_chain_link};
use ledgerops_telemetry::{error_metrics, query_metrics};
use ledgerops_types::app::{
    Block, BlockHeight, BlockInfo, BlockVerification, ChaincodeInfo, GenesisInfo, Peer,
    TransactionInfo, TransactionSummary,
};
use ledgerops_types::config::OrchestratorConfig;
use ledgerops_types::error::{ErrorCode, QueryError, ResolveError};
use std::sync::Arc;

/// Which organization, channel and (optionally) peer a query reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelScope {
    /// Organization whose identity and topology are used.
    pub org: String,
    /// Channel to read.
    pub channel: String,
    /// Peer to read from; the organization's first peer on the channel when unset.
    pub peer: Option<String>,
}

impl ChannelScope {
    /// Reads `channel` through the first peer of `org`.
    pub fn new(org: &str, channel: &str) -> Self {
        Self {
            org: org.to_string(),
            channel: channel.to_string(),
            peer: None,
        }
    }

    /// Reads through the named peer instead.
    pub fn on_peer(mut self, peer: &str) -> Self {
        self.peer = Some(peer.to_string());
        self
    }
}

/// Read-only queries against a channel's ledger.
#[derive(Debug, Clone)]
pub struct ChannelQueries {
    transport: Arc<dyn LedgerTransport>,
    contexts: Arc<dyn ContextResolver>,
    user: String,
}

fn record<T>(query: &'static str, result: Result<T, QueryError>) -> Result<T, QueryError> {
    match &result {
        Ok(_) => query_metrics().inc_queries_total(query, "success"),
        Err(e) => {
            query_metrics().inc_queries_total(query, "failure");
            error_metrics().inc_error("query", e.code());
            tracing::warn!(target: "query", query, error = %e, "Query failed");
        }
    }
    result
}

impl ChannelQueries {
    /// Creates a query engine reading as `config.user`.
    pub fn new(
        transport: Arc<dyn LedgerTransport>,
        contexts: Arc<dyn ContextResolver>,
        config: &OrchestratorConfig,
    ) -> Self {
        Self {
            transport,
            contexts,
            user: config.user.clone(),
        }
    }

    async fn target(&self, scope: &ChannelScope) -> Result<(CallContext, Peer), QueryError> {
        let ctx = self
            .contexts
            .resolve(&scope.org, &self.user, Some(scope.channel.as_str()))
            .await?;
        let peer = match &scope.peer {
            Some(name) => ctx.topology.peer(name).cloned(),
            None => ctx.topology.peers.first().cloned(),
        };
        let peer = peer.ok_or_else(|| ResolveError::PeerNotFound {
            org: scope.org.clone(),
            peer: scope.peer.clone().unwrap_or_default(),
        })?;
        tracing::debug!(
            target: "query",
            org = %scope.org,
            channel = %scope.channel,
            peer = %peer.name,
            "Resolved query target"
        );
        Ok((ctx, peer))
    }

    async fn block_at(&self, scope: &ChannelScope, height: u64) -> Result<Block, QueryError> {
        let number = height.checked_sub(1).ok_or(QueryError::InvalidHeight(height))?;
        let (_, peer) = self.target(scope).await?;
        Ok(self.transport.read_block(&peer, &scope.channel, number).await?)
    }

    /// The number of blocks on the channel.
    pub async fn chain_height(&self, scope: &ChannelScope) -> Result<BlockHeight, QueryError> {
        let result = async {
            let (_, peer) = self.target(scope).await?;
            let info = self.transport.read_chain_info(&peer, &scope.channel).await?;
            Ok::<_, QueryError>(BlockHeight {
                block_height: info.height,
            })
        }
        .await;
        record("chain_height", result)
    }

    /// The genesis block's data hash and recomputed header hash.
    pub async fn genesis_block_hash(&self, scope: &ChannelScope) -> Result<GenesisInfo, QueryError> {
        let result = async {
            let genesis = self.block_at(scope, 1).await?;
            Ok::<_, QueryError>(GenesisInfo {
                block_hash: block_header_hash(&genesis.header)?,
                data_hash: genesis.header.data_hash,
            })
        }
        .await;
        record("genesis_block_hash", result)
    }

    /// The block at 1-based `height`, with its recomputed header hash and a
    /// flattened transaction list. Height 0 is rejected.
    pub async fn block_by_height(
        &self,
        scope: &ChannelScope,
        height: u64,
    ) -> Result<BlockInfo, QueryError> {
        let result = async {
            let block = self.block_at(scope, height).await?;
            let block_hash = block_header_hash(&block.header)?;
            let transactions: Vec<TransactionSummary> = block
                .transactions
                .into_iter()
                .map(|tx| TransactionSummary {
                    transaction_id: tx.tx_id,
                    creator_msp_id: tx.creator_msp_id,
                })
                .collect();
            Ok::<_, QueryError>(BlockInfo {
                block_number: block.header.number,
                block_hash,
                previous_hash: block.header.previous_hash,
                data_hash: block.header.data_hash,
                transactions_count: transactions.len(),
                transactions,
            })
        }
        .await;
        record("block_by_height", result)
    }

    /// A committed transaction's header fields.
    pub async fn transaction_by_id(
        &self,
        scope: &ChannelScope,
        tx_id: &str,
    ) -> Result<TransactionInfo, QueryError> {
        let result = async {
            let (_, peer) = self.target(scope).await?;
            let processed = self
                .transport
                .read_transaction(&peer, &scope.channel, tx_id)
                .await?;
            let tx = processed.transaction;
            Ok::<_, QueryError>(TransactionInfo {
                tx_id: tx.tx_id,
                channel_id: tx.channel_id,
                timestamp: tx.timestamp,
                type_label: tx.type_label,
            })
        }
        .await;
        record("transaction_by_id", result)
    }

    /// Name and version of every chaincode instantiated on the channel.
    pub async fn instantiated_chaincodes(
        &self,
        scope: &ChannelScope,
    ) -> Result<Vec<ChaincodeInfo>, QueryError> {
        let result = async {
            let (_, peer) = self.target(scope).await?;
            Ok::<_, QueryError>(self
                .transport
                .read_instantiated_chaincodes(&peer, &scope.channel)
                .await?)
        }
        .await;
        record("instantiated_chaincodes", result)
    }

    /// Checks the block at `height` against the chain.
    ///
    /// For `height > 1` the predecessor is fetched and its recomputed header
    /// hash must equal the block's `previous_hash`. When `expected` is given it
    /// must equal the block's own recomputed hash. Mismatches are reported as
    /// `QueryError::Integrity` and never corrected.
    pub async fn verify_block(
        &self,
        scope: &ChannelScope,
        height: u64,
        expected: Option<&str>,
    ) -> Result<BlockVerification, QueryError> {
        let result = async {
            let block = self.block_at(scope, height).await?;
            let block_hash = match expected {
                Some(expected) => verify_block_header(&block.header, expected)?,
                None => block_header_hash(&block.header)?,
            };
            let predecessor_hash = if height > 1 {
                let predecessor = self.block_at(scope, height - 1).await?;
                Some(verify_chain_link(&predecessor.header, &block.header)?)
            } else {
                None
            };
            tracing::info!(
                target: "query",
                channel = %scope.channel,
                block = block.header.number,
                hash = %block_hash,
                "Block verified"
            );
            Ok::<_, QueryError>(BlockVerification {
                block_number: block.header.number,
                block_hash,
                predecessor_hash,
            })
        }
        .await;
        record("verify_block", result)
    }
}
