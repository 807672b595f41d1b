// Path: crates/client/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # ledgerops Client
//!
//! The orchestration core. It turns the raw endorsement and commit primitives
//! of a `LedgerTransport` into atomic chaincode lifecycle operations
//! (install, instantiate, upgrade), contract invocations, and read-only
//! channel queries with block-hash verification.
//!
//! Every call resolves its own [`context::CallContext`] and owns its proposal,
//! transaction id and response set. Nothing mutable is shared between calls
//! except the optional, explicitly invalidated context cache.

pub mod context;
pub mod contract;
pub mod lifecycle;
pub mod queries;
pub mod topology;

pub use context::{resolver_for, CachedResolver, CallContext, ContextResolver, DirectResolver};
pub use contract::ContractGateway;
pub use lifecycle::{ChaincodeManager, DeployRequest, InstallRequest};
pub use queries::{ChannelQueries, ChannelScope};
pub use topology::StaticTopology;
