// Path: crates/types/src/app/identity.rs

//! Signing identities and the transaction identifiers derived from them.

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// The credentials of one user of one organization.
///
/// Loaded by the identity provider and never mutated afterwards. The private
/// key material is wiped from memory when the identity is dropped and is never
/// serialized or printed.
#[derive(Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Organization name as used by the topology profile (e.g. `acme`).
    pub organization: String,
    /// User name inside the organization's credential store (e.g. `Admin`).
    pub user: String,
    /// The MSP identifier the ledger recognizes this identity under.
    pub msp_id: String,
    /// PEM-encoded enrollment certificate.
    pub certificate: String,
    /// Raw private key material.
    #[serde(skip)]
    pub private_key: Zeroizing<Vec<u8>>,
}

impl Identity {
    /// Serialized creator bytes: the MSP id followed by the certificate.
    ///
    /// These bytes are bound into every `TransactionId` and identify the
    /// submitter to peers.
    pub fn creator_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.msp_id.len() + self.certificate.len());
        out.extend_from_slice(self.msp_id.as_bytes());
        out.extend_from_slice(self.certificate.as_bytes());
        out
    }
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("organization", &self.organization)
            .field("user", &self.user)
            .field("msp_id", &self.msp_id)
            .finish_non_exhaustive()
    }
}

/// The identifier tying a proposal to its later commit events.
///
/// Created once per lifecycle operation and never reused.
#[derive(Encode, Decode, Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransactionId {
    /// Random nonce mixed into the id.
    pub nonce: Vec<u8>,
    /// Creator bytes of the submitting identity.
    pub creator: Vec<u8>,
    /// Lowercase hex of `SHA-256(nonce || creator)`.
    pub id: String,
}

impl TransactionId {
    /// The derived string form of the id.
    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id)
    }
}
