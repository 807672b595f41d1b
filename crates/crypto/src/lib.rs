// Path: crates/crypto/src/lib.rs
//! # ledgerops Crypto Crate Lints
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
        clippy::indexing_slicing
    )
)]
//! # ledgerops Cryptography
//!
//! Hashing, the DER writer used for block header hashing, block-hash
//! verification, transaction id derivation and proposal signing.

pub mod algorithms;
pub mod block;
pub mod der;
pub mod error;
pub mod sign;
pub mod txid;

pub use block::{block_header_hash, verify_block_header, verify_chain_link};
pub use sign::sign_proposal;
pub use txid::new_transaction_id;
