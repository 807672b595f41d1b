// Path: crates/api/src/lib.rs

//! # ledgerops API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
//! # ledgerops API
//!
//! Interfaces to the collaborators the orchestration core depends on but does
//! not own: the identity store, the network topology and the ledger transport.

/// Re-exports all core error types from the central `ledgerops-types` crate.
pub mod error;
/// Defines the `IdentityProvider` and `SigningIdentity` traits.
pub mod identity;
/// Defines the `TopologyResolver` trait.
pub mod topology;
/// Defines the `LedgerTransport` and `CommitListener` traits.
pub mod transport;
