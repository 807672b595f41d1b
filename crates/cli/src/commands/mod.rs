// Path: crates/cli/src/commands/mod.rs

pub mod block_hash;
pub mod config;
pub mod topology;
