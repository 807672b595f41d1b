// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # ledgerops Types
//!
//! This crate is the foundational library for ledgerops, containing the data
//! model shared by the lifecycle orchestrator, the channel query engine and the
//! collaborator interfaces, together with error types and configuration objects.
//!
//! ## Architectural Role
//!
//! As the base crate, `ledgerops-types` has minimal dependencies and is itself a
//! dependency for every other crate in the workspace. This prevents circular
//! dependencies and provides one canonical definition for shared types like
//! `Proposal`, `ResponseSet`, `CommitEvent` and `BlockHeader`.

/// The endorsement status code a peer returns when it approves a proposal.
pub const ENDORSEMENT_OK: u32 = 200;

/// Core application-level data structures like `Proposal`, `CommitEvent` and `Block`.
pub mod app;
/// The canonical, deterministic binary codec used for signing payloads.
pub mod codec;
/// Configuration structures for the orchestrator and topology profiles.
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;
