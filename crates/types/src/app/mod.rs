// Path: crates/types/src/app/mod.rs
//! Core application-level data structures.

/// Block headers, chain info and query read models.
pub mod block;
/// Orderer acknowledgements and commit notifications.
pub mod commit;
/// Signing identities and transaction ids.
pub mod identity;
/// Peers, orderer endpoints and resolved topologies.
pub mod peer;
/// Proposals, endorsements and response sets.
pub mod proposal;
/// Lifecycle results.
pub mod result;

pub use block::*;
pub use commit::*;
pub use identity::*;
pub use peer::*;
pub use proposal::*;
pub use result::*;
