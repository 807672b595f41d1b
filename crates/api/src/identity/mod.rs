// Path: crates/api/src/identity/mod.rs

//! Defines the traits for decoupled identity lookups and signing.

use async_trait::async_trait;
use ledgerops_types::app::Identity;
use ledgerops_types::error::{CryptoError, ResolveError};
use std::fmt::Debug;
use std::sync::Arc;

/// An identity that can sign on behalf of its owner.
///
/// The private key never leaves the implementation; callers only see the
/// public parts through `identity()` and the output of `sign`.
pub trait SigningIdentity: Send + Sync + Debug {
    /// The public description of the identity.
    fn identity(&self) -> &Identity;

    /// Signs `message`, returning the raw signature bytes.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError>;
}

/// The credential store: supplies a signing identity per organization and user.
#[async_trait]
pub trait IdentityProvider: Send + Sync + Debug {
    /// Loads the identity of `user` in `org`.
    ///
    /// Returns `ResolveError::IdentityNotFound` if the store has no such user.
    async fn resolve_identity(
        &self,
        org: &str,
        user: &str,
    ) -> Result<Arc<dyn SigningIdentity>, ResolveError>;
}
