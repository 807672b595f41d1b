// Path: crates/crypto/src/sign.rs
//! Proposal signing.

use crate::error::CryptoError;
use ledgerops_api::identity::SigningIdentity;
use ledgerops_types::app::{Proposal, SignedProposal};
use ledgerops_types::codec;

/// Encodes `proposal` canonically and signs the bytes with `signer`.
pub fn sign_proposal(
    signer: &dyn SigningIdentity,
    proposal: Proposal,
) -> Result<SignedProposal, CryptoError> {
    let proposal_bytes = codec::to_bytes_canonical(&proposal).map_err(CryptoError::Encoding)?;
    let signature = signer.sign(&proposal_bytes)?;
    Ok(SignedProposal {
        proposal,
        proposal_bytes,
        signature,
    })
}
