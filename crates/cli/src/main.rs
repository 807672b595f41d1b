// Path: crates/cli/src/main.rs
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

//! # ledgerops CLI
//!
//! Offline operator tooling: recompute and check block header hashes, inspect
//! topology profiles and validate orchestrator configuration files.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::*;

#[derive(Parser, Debug)]
#[clap(
    name = "ledgerops",
    version,
    about = "Operator tooling for the ledgerops orchestration layer."
)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute a block header hash, optionally checking it against an expected value.
    BlockHash(block_hash::BlockHashArgs),

    /// Resolve an organization from a topology profile and print it as JSON.
    Topology(topology::TopologyArgs),

    /// Validate an orchestrator configuration file and print the effective values.
    Config(config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    ledgerops_telemetry::init::init_tracing()?;

    let output = match cli.command {
        Commands::BlockHash(args) => block_hash::run(args)?,
        Commands::Topology(args) => topology::run(args)?,
        Commands::Config(args) => config::run(args)?,
    };
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_block_hash_flags() {
        let cli = Cli::try_parse_from([
            "ledgerops",
            "block-hash",
            "--number",
            "5",
            "--previous-hash",
            "ab",
            "--data-hash",
            "cd",
            "--expect",
            "ff",
        ])
        .unwrap();
        match cli.command {
            Commands::BlockHash(args) => {
                assert_eq!(args.number, 5);
                assert_eq!(args.expect.as_deref(), Some("ff"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn previous_hash_defaults_to_empty_for_genesis() {
        let cli = Cli::try_parse_from(["ledgerops", "block-hash", "--number", "0", "--data-hash", "ef"])
            .unwrap();
        match cli.command {
            Commands::BlockHash(args) => assert!(args.previous_hash.is_empty()),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn topology_requires_an_org() {
        assert!(Cli::try_parse_from(["ledgerops", "topology", "--profile", "net.toml"]).is_err());
    }
}
