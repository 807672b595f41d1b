// Path: crates/crypto/src/error.rs
//! Local error types for the `ledgerops-crypto` crate.

// Re-export the canonical error type from the API crate.
pub use ledgerops_api::error::CryptoError;
