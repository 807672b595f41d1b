// Path: crates/test_utils/src/lib.rs
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

//! # ledgerops Test Utilities
//!
//! Utilities for testing the ledgerops components: assertion macros, an
//! in-memory scripted ledger transport, a static identity provider and
//! reusable fixtures.

pub mod assertions;
pub mod fixtures;
pub mod identity;
pub mod ledger;

pub use identity::{MockSigningIdentity, StaticIdentityProvider};
pub use ledger::{CommitScript, EndorseScript, LedgerEvent, MockLedger, OrdererScript, PeerScript};
