// Path: crates/client/src/lifecycle/broadcast.rs
//! Concurrent proposal fan-out.

use futures_util::future::join_all;
use ledgerops_api::transport::LedgerTransport;
use ledgerops_types::app::{EndorsementOutcome, Peer, ResponseSet, SignedProposal};
use ledgerops_types::error::LifecycleError;
use std::time::Duration;

/// Sends `proposal` to every peer at once and collects one outcome per peer,
/// in the order of `peers`.
///
/// A peer that errors or does not answer within `timeout` is recorded as
/// `EndorsementOutcome::Missing`; it never stops the other sends.
pub async fn broadcast(
    transport: &dyn LedgerTransport,
    peers: &[Peer],
    proposal: &SignedProposal,
    timeout: Duration,
) -> Result<ResponseSet, LifecycleError> {
    let sends = peers.iter().map(|peer| async move {
        match tokio::time::timeout(timeout, transport.send_proposal(peer, proposal)).await {
            Ok(Ok(response)) => {
                tracing::debug!(
                    target: "lifecycle",
                    peer = %peer.name,
                    status = response.status,
                    "Endorsement response received"
                );
                EndorsementOutcome::Response(response)
            }
            Ok(Err(e)) => {
                tracing::warn!(target: "lifecycle", peer = %peer.name, error = %e, "Proposal send failed");
                EndorsementOutcome::Missing {
                    peer: peer.name.clone(),
                    reason: e.to_string(),
                }
            }
            Err(_) => {
                tracing::warn!(target: "lifecycle", peer = %peer.name, "Proposal send timed out");
                EndorsementOutcome::Missing {
                    peer: peer.name.clone(),
                    reason: format!("no response within {} ms", timeout.as_millis()),
                }
            }
        }
    });
    let outcomes = join_all(sends).await;
    ResponseSet::new(outcomes).ok_or(LifecycleError::EmptyResponseSet)
}
