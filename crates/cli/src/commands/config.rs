// Path: crates/cli/src/commands/config.rs

use anyhow::{Context, Result};
use clap::Parser;
use ledgerops_types::config::OrchestratorConfig;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Path to the orchestrator TOML file.
    #[clap(long)]
    pub path: PathBuf,
}

pub fn run(args: ConfigArgs) -> Result<String> {
    let raw = fs::read_to_string(&args.path)
        .with_context(|| format!("reading {}", args.path.display()))?;
    let config: OrchestratorConfig =
        toml::from_str(&raw).with_context(|| format!("parsing {}", args.path.display()))?;
    if config.commit_timeout_ms == 0 || config.proposal_timeout_ms == 0 {
        anyhow::bail!("timeouts must be greater than zero");
    }
    Ok(toml::to_string_pretty(&config)?)
}
