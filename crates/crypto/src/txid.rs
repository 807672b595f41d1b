// Path: crates/crypto/src/txid.rs
//! Transaction id derivation.

use crate::algorithms::hash::sha256;
use ledgerops_types::app::{Identity, TransactionId};
use rand::RngCore;

/// Size of the random nonce bound into every transaction id.
pub const NONCE_LEN: usize = 24;

/// Derives the id for a given nonce and creator: hex `SHA-256(nonce || creator)`.
pub fn derive_transaction_id(nonce: Vec<u8>, creator: Vec<u8>) -> TransactionId {
    let mut preimage = Vec::with_capacity(nonce.len() + creator.len());
    preimage.extend_from_slice(&nonce);
    preimage.extend_from_slice(&creator);
    let id = hex::encode(sha256(&preimage));
    TransactionId { nonce, creator, id }
}

/// Creates a fresh transaction id for `identity` with a random nonce.
pub fn new_transaction_id(identity: &Identity) -> TransactionId {
    let mut nonce = vec![0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);
    derive_transaction_id(nonce, identity.creator_bytes())
}
