// Path: crates/client/src/lifecycle/commit_wait.rs
//! Per-peer commit listeners.
//!
//! Listeners are armed for every target before the orderer is contacted, then
//! each one waits for its transaction independently under its own timer. The
//! joined result always carries one outcome per peer: a slow or failed peer
//! never hides what the others reported.

use futures_util::future::join_all;
use ledgerops_api::transport::{CommitListener, LedgerTransport};
use ledgerops_types::app::{CommitEvent, CommitOutcome, Peer};
use ledgerops_types::error::{LifecycleError, TransportError};
use std::time::Duration;

/// A registered listener together with the peer it watches.
///
/// Dropping an armed listener releases it if nothing else has, so a cancelled
/// operation never leaves a connection open.
pub struct ArmedListener {
    peer: Peer,
    listener: Box<dyn CommitListener>,
    released: bool,
}

impl std::fmt::Debug for ArmedListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArmedListener")
            .field("peer", &self.peer.name)
            .finish_non_exhaustive()
    }
}

impl ArmedListener {
    fn new(peer: Peer, listener: Box<dyn CommitListener>) -> Self {
        Self {
            peer,
            listener,
            released: false,
        }
    }

    /// The watched peer.
    pub fn peer(&self) -> &Peer {
        &self.peer
    }

    /// Releases the underlying listener. Later calls are no-ops.
    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            self.listener.release();
        }
    }
}

impl Drop for ArmedListener {
    fn drop(&mut self) {
        if !self.released {
            tracing::debug!(target: "commit_wait", peer = %self.peer.name, "Releasing listener of a cancelled wait");
            self.release();
        }
    }
}

/// Registers a listener for `tx_id` on every peer.
///
/// Returns only once every listener is armed. If any registration fails, the
/// listeners that did arm are released and the first failure in target order
/// is reported; the caller must not submit in that case.
pub async fn arm(
    transport: &dyn LedgerTransport,
    peers: &[Peer],
    tx_id: &str,
) -> Result<Vec<ArmedListener>, LifecycleError> {
    let registrations = peers.iter().map(|peer| async move {
        transport
            .register_commit_listener(peer, tx_id)
            .await
            .map(|listener| ArmedListener::new(peer.clone(), listener))
            .map_err(|e| (peer.name.clone(), e))
    });
    let results = join_all(registrations).await;

    let mut armed = Vec::with_capacity(results.len());
    let mut first_failure = None;
    for result in results {
        match result {
            Ok(listener) => armed.push(listener),
            Err((peer, e)) => {
                tracing::warn!(target: "commit_wait", peer = %peer, error = %e, "Listener registration failed");
                first_failure.get_or_insert((peer, e));
            }
        }
    }

    match first_failure {
        None => {
            tracing::debug!(target: "commit_wait", tx_id, listeners = armed.len(), "All commit listeners armed");
            Ok(armed)
        }
        Some((peer, e)) => {
            for mut listener in armed {
                listener.release();
            }
            Err(LifecycleError::CommitListenerFailed {
                peer,
                reason: e.to_string(),
            })
        }
    }
}

async fn next_matching(
    listener: &mut dyn CommitListener,
    tx_id: &str,
) -> Result<CommitEvent, TransportError> {
    loop {
        let event = listener.next_event().await?;
        if event.tx_id == tx_id {
            return Ok(event);
        }
        tracing::trace!(target: "commit_wait", peer = %event.peer, other = %event.tx_id, "Ignoring event for another transaction");
    }
}

/// Waits for `tx_id` to commit on one peer, then releases the listener.
///
/// The listener is released exactly once, whether the event arrived, the
/// stream failed or the timer fired.
pub async fn wait(mut armed: ArmedListener, tx_id: &str, timeout: Duration) -> CommitOutcome {
    let settled = tokio::time::timeout(timeout, next_matching(armed.listener.as_mut(), tx_id)).await;
    armed.release();

    let peer = armed.peer.name.clone();
    let outcome = match settled {
        Ok(Ok(event)) if event.is_valid() => CommitOutcome::Valid {
            peer,
            block_number: event.block_number,
        },
        Ok(Ok(event)) => CommitOutcome::Invalid {
            peer,
            code: event.validation_code,
        },
        Ok(Err(e)) => CommitOutcome::Failed {
            peer,
            reason: e.to_string(),
        },
        Err(_) => CommitOutcome::TimedOut {
            peer,
            url: armed.peer.url.clone(),
        },
    };
    match &outcome {
        CommitOutcome::Valid { .. } => {
            tracing::debug!(target: "commit_wait", peer = %outcome.peer(), tx_id, "Transaction committed")
        }
        other => {
            tracing::warn!(target: "commit_wait", peer = %other.peer(), tx_id, outcome = other.label(), "Commit not confirmed")
        }
    }
    ledgerops_telemetry::lifecycle_metrics().inc_commit_outcome(outcome.label());
    outcome
}

/// Waits on every listener concurrently and returns every outcome, in the
/// order the listeners were armed.
pub async fn wait_all(
    listeners: Vec<ArmedListener>,
    tx_id: &str,
    timeout: Duration,
) -> Vec<CommitOutcome> {
    join_all(listeners.into_iter().map(|l| wait(l, tx_id, timeout))).await
}
