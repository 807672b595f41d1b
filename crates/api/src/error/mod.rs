// Path: crates/api/src/error/mod.rs
// Re-export all core error types from the central types crate.
pub use ledgerops_types::error::{
    CryptoError, EndorsementFailure, ErrorCode, LifecycleError, QueryError, ResolveError,
    TransportError,
};
