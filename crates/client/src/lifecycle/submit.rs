// Path: crates/client/src/lifecycle/submit.rs
//! Orderer submission and the final reconciliation of ack and commit outcomes.

use ledgerops_api::transport::LedgerTransport;
use ledgerops_types::app::{CommitOutcome, Endpoint, OrdererAck, OrderingRequest};
use ledgerops_types::error::{ErrorCode, LifecycleError};

/// Submits `request` once. A transport failure is folded into a failure ack
/// carrying the transport error code, so the caller always gets an ack.
pub async fn submit(
    transport: &dyn LedgerTransport,
    orderer: &Endpoint,
    request: &OrderingRequest,
) -> OrdererAck {
    tracing::info!(
        target: "orderer",
        orderer = %orderer.name,
        tx_id = %request.tx_id,
        endorsements = request.endorsements.len(),
        "Submitting transaction"
    );
    match transport.submit_to_orderer(orderer, request).await {
        Ok(ack) => {
            tracing::info!(target: "orderer", tx_id = %request.tx_id, status = %ack.status, "Orderer acknowledged");
            ack
        }
        Err(e) => {
            tracing::error!(target: "orderer", tx_id = %request.tx_id, error = %e, "Orderer submission failed");
            OrdererAck::failure(e.code())
        }
    }
}

/// Reduces the orderer ack and every listener outcome to one verdict.
///
/// A non-success ack fails the operation regardless of the listeners.
/// Otherwise the first non-valid outcome, in target order, is the cause.
pub fn reconcile(ack: &OrdererAck, outcomes: &[CommitOutcome]) -> Result<(), LifecycleError> {
    if !ack.is_success() {
        return Err(LifecycleError::OrderingFailed {
            status: ack.status.to_string(),
        });
    }
    let first_error = outcomes.iter().find_map(|outcome| match outcome {
        CommitOutcome::Valid { .. } => None,
        CommitOutcome::Invalid { peer, code } => Some(LifecycleError::InvalidCommit {
            peer: peer.clone(),
            code: code.clone(),
        }),
        CommitOutcome::TimedOut { peer, .. } => {
            Some(LifecycleError::CommitTimeout { peer: peer.clone() })
        }
        CommitOutcome::Failed { peer, reason } => Some(LifecycleError::CommitListenerFailed {
            peer: peer.clone(),
            reason: reason.clone(),
        }),
    });
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid(peer: &str) -> CommitOutcome {
        CommitOutcome::Valid {
            peer: peer.into(),
            block_number: 3,
        }
    }

    #[test]
    fn ack_failure_wins_over_valid_commits() {
        let err = reconcile(&OrdererAck::failure("BAD_REQUEST"), &[valid("p1")]).unwrap_err();
        assert_eq!(err.cause(), "OrderingFailed:BAD_REQUEST");
    }

    #[test]
    fn first_listener_error_in_target_order_is_the_cause() {
        let outcomes = [
            valid("p1"),
            CommitOutcome::TimedOut {
                peer: "p2".into(),
                url: "grpc://p2:7051".into(),
            },
            CommitOutcome::Invalid {
                peer: "p3".into(),
                code: "ENDORSEMENT_POLICY_FAILURE".into(),
            },
        ];
        let err = reconcile(&OrdererAck::success(), &outcomes).unwrap_err();
        assert_eq!(err.cause(), "CommitTimeout:p2");
    }

    #[test]
    fn success_requires_every_listener_valid() {
        assert!(reconcile(&OrdererAck::success(), &[valid("p1"), valid("p2")]).is_ok());
        let err = reconcile(
            &OrdererAck::success(),
            &[CommitOutcome::Invalid {
                peer: "p1".into(),
                code: "MVCC_READ_CONFLICT".into(),
            }],
        )
        .unwrap_err();
        assert_eq!(err.cause(), "InvalidCommit:p1:MVCC_READ_CONFLICT");
    }
}
