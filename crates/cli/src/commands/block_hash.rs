// Path: crates/cli/src/commands/block_hash.rs

use anyhow::{bail, Result};
use clap::Parser;
use ledgerops_crypto::{block_header_hash, verify_block_header};
use ledgerops_types::app::BlockHeader;
use ledgerops_types::error::CryptoError;
use serde::Serialize;

#[derive(Parser, Debug)]
pub struct BlockHashArgs {
    /// Block number.
    #[clap(long)]
    pub number: u64,
    /// Hex header hash of the previous block. Empty for the genesis block.
    #[clap(long, default_value = "")]
    pub previous_hash: String,
    /// Hex hash of the block's data section.
    #[clap(long)]
    pub data_hash: String,
    /// Expected header hash (hex, any case). A mismatch exits non-zero.
    #[clap(long)]
    pub expect: Option<String>,
}

#[derive(Serialize, Debug)]
struct Report {
    number: u64,
    block_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    verified: Option<bool>,
}

pub fn run(args: BlockHashArgs) -> Result<String> {
    let header = BlockHeader {
        number: args.number,
        previous_hash: args.previous_hash,
        data_hash: args.data_hash,
    };
    let report = match args.expect.as_deref() {
        None => Report {
            number: header.number,
            block_hash: block_header_hash(&header)?,
            verified: None,
        },
        Some(expected) => match verify_block_header(&header, expected) {
            Ok(block_hash) => Report {
                number: header.number,
                block_hash,
                verified: Some(true),
            },
            Err(CryptoError::EncodingMismatch { expected, computed }) => {
                tracing::warn!(target: "cli", block = header.number, %expected, %computed, "Header hash mismatch");
                bail!(
                    "block {} hash mismatch: expected {}, computed {}",
                    header.number,
                    expected,
                    computed
                );
            }
            Err(e) => return Err(e.into()),
        },
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(expect: Option<&str>) -> BlockHashArgs {
        BlockHashArgs {
            number: 5,
            previous_hash: "ab".repeat(32),
            data_hash: "cd".repeat(32),
            expect: expect.map(str::to_string),
        }
    }

    #[test]
    fn prints_the_header_hash() {
        let out = run(args(None)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            json["block_hash"],
            "8601e458e198b3e299388546a3ab4dfb1af4bd8175294c2f6c97dc8eb86fba9f"
        );
        assert!(json.get("verified").is_none());
    }

    #[test]
    fn expected_hash_is_checked() {
        let ok = run(args(Some(
            "8601E458E198B3E299388546A3AB4DFB1AF4BD8175294C2F6C97DC8EB86FBA9F",
        )))
        .unwrap();
        assert!(ok.contains("\"verified\": true"));

        let err = run(args(Some(&"00".repeat(32)))).unwrap_err();
        assert!(err.to_string().contains("hash mismatch"));
    }

    #[test]
    fn malformed_hex_is_an_error() {
        let mut bad = args(None);
        bad.data_hash = "xyz".into();
        assert!(run(bad).is_err());
    }
}
