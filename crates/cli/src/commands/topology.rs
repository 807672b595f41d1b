// Path: crates/cli/src/commands/topology.rs

use anyhow::{Context, Result};
use clap::Parser;
use ledgerops_client::StaticTopology;
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct TopologyArgs {
    /// Path to the TOML topology profile.
    #[clap(long)]
    pub profile: PathBuf,
    /// Organization to resolve.
    #[clap(long)]
    pub org: String,
    /// Narrow the peers to those joined to this channel.
    #[clap(long)]
    pub channel: Option<String>,
}

pub fn run(args: TopologyArgs) -> Result<String> {
    let topology = StaticTopology::from_file(&args.profile)
        .with_context(|| format!("loading profile {}", args.profile.display()))?;
    let resolved = topology.resolve(&args.org, args.channel.as_deref())?;
    tracing::info!(
        target: "cli",
        org = %resolved.organization,
        peers = resolved.peers.len(),
        "Resolved topology"
    );
    Ok(serde_json::to_string_pretty(&resolved)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerops_test_utils::fixtures::{TestFixtures, CHANNEL};
    use std::io::Write;

    fn profile_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let raw = toml::to_string(&TestFixtures::topology_profile()).unwrap();
        file.write_all(raw.as_bytes()).unwrap();
        file
    }

    #[test]
    fn resolves_an_org_on_a_channel() {
        let file = profile_file();
        let out = run(TopologyArgs {
            profile: file.path().to_path_buf(),
            org: "budget".into(),
            channel: Some(CHANNEL.into()),
        })
        .unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(json["msp_id"], "BudgetMSP");
        assert_eq!(json["peers"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn unknown_org_is_an_error() {
        let file = profile_file();
        let err = run(TopologyArgs {
            profile: file.path().to_path_buf(),
            org: "zeta".into(),
            channel: None,
        })
        .unwrap_err();
        assert!(err.to_string().contains("zeta"));
    }

    #[test]
    fn missing_profile_is_an_error() {
        assert!(run(TopologyArgs {
            profile: PathBuf::from("/nonexistent/profile.toml"),
            org: "acme".into(),
            channel: None,
        })
        .is_err());
    }
}
