// Path: crates/test_utils/src/identity.rs
//! An in-memory identity store.

use async_trait::async_trait;
use ledgerops_api::identity::{IdentityProvider, SigningIdentity};
use ledgerops_crypto::algorithms::hash::sha256;
use ledgerops_types::app::Identity;
use ledgerops_types::error::{CryptoError, ResolveError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A signing identity whose "signature" is `SHA-256(key || message)`.
///
/// Deterministic, so tests can recompute and compare signatures.
#[derive(Debug)]
pub struct MockSigningIdentity {
    identity: Identity,
}

impl MockSigningIdentity {
    /// Creates an identity for `user` of `org` with a key derived from both names.
    pub fn new(org: &str, user: &str, msp_id: &str) -> Self {
        Self {
            identity: Identity {
                organization: org.to_string(),
                user: user.to_string(),
                msp_id: msp_id.to_string(),
                certificate: format!(
                    "-----BEGIN CERTIFICATE-----\n{}@{}\n-----END CERTIFICATE-----\n",
                    user, org
                ),
                private_key: format!("{}:{}:key", org, user).into_bytes().into(),
            },
        }
    }

    /// The signature this identity produces for `message`.
    pub fn expected_signature(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let mut preimage = self.identity.private_key.to_vec();
        preimage.extend_from_slice(message);
        Ok(sha256(&preimage).to_vec())
    }
}

impl SigningIdentity for MockSigningIdentity {
    fn identity(&self) -> &Identity {
        &self.identity
    }

    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.expected_signature(message)
    }
}

/// A credential store backed by a map of `(org, user)` pairs.
#[derive(Debug, Default)]
pub struct StaticIdentityProvider {
    identities: HashMap<(String, String), Arc<MockSigningIdentity>>,
    lookups: AtomicUsize,
}

impl StaticIdentityProvider {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mock identity for `user` of `org`.
    pub fn with_identity(mut self, org: &str, user: &str, msp_id: &str) -> Self {
        self.identities.insert(
            (org.to_string(), user.to_string()),
            Arc::new(MockSigningIdentity::new(org, user, msp_id)),
        );
        self
    }

    /// How many times `resolve_identity` has been called.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn resolve_identity(
        &self,
        org: &str,
        user: &str,
    ) -> Result<Arc<dyn SigningIdentity>, ResolveError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.identities
            .get(&(org.to_string(), user.to_string()))
            .map(|id| id.clone() as Arc<dyn SigningIdentity>)
            .ok_or_else(|| ResolveError::IdentityNotFound {
                org: org.to_string(),
                user: user.to_string(),
            })
    }
}
