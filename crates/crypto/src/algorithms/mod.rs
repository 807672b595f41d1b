// Path: crates/crypto/src/algorithms/mod.rs
//! Primitive algorithms.

pub mod hash;
