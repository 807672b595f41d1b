// Path: crates/client/src/lifecycle/quorum.rs
//! The all-must-endorse policy.

use ledgerops_types::app::{EndorsementOutcome, ResponseSet};
use ledgerops_types::error::{EndorsementFailure, LifecycleError};

/// Accepts `responses` only if every peer endorsed with status 200.
///
/// A missing response counts as a rejection. The error names every failing
/// peer, in target order.
pub fn evaluate(responses: &ResponseSet) -> Result<(), LifecycleError> {
    let all_good = responses.outcomes().iter().all(EndorsementOutcome::is_endorsed);
    if all_good {
        return Ok(());
    }
    let failures = responses
        .outcomes()
        .iter()
        .filter(|o| !o.is_endorsed())
        .map(|o| EndorsementFailure {
            peer: o.peer().to_string(),
            status: o.status(),
            message: match o {
                EndorsementOutcome::Response(r) => r.message.clone(),
                EndorsementOutcome::Missing { reason, .. } => reason.clone(),
            },
        })
        .collect();
    Err(LifecycleError::EndorsementFailed { failures })
}
