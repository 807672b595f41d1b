// Path: crates/types/src/codec.rs

//! Defines the canonical, deterministic binary codec for signed payloads.
//!
//! Proposals are signed over their SCALE encoding. Centralizing the codec here
//! guarantees that the bytes a caller signs and the bytes a peer receives are
//! produced by the same function.

use parity_scale_codec::{Decode, DecodeAll, Encode};

/// Encodes a value into a deterministic, canonical byte representation using SCALE codec.
///
/// This function should be used for all data that is included in a signature.
pub fn to_bytes_canonical<T: Encode>(v: &T) -> Result<Vec<u8>, String> {
    Ok(v.encode())
}

/// Decodes a value from a canonical byte representation using SCALE codec.
///
/// This function fails fast on any decoding error, including trailing bytes,
/// returning a descriptive string.
pub fn from_bytes_canonical<T: Decode>(b: &[u8]) -> Result<T, String> {
    T::decode_all(&mut &*b).map_err(|e| format!("canonical decode failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{ChaincodeSpec, ChaincodeType, OperationKind, Proposal, TransactionId};

    fn sample_proposal() -> Proposal {
        Proposal {
            kind: OperationKind::Instantiate,
            chaincode: ChaincodeSpec {
                id: "erc20".into(),
                version: "1.0".into(),
                path: None,
                chaincode_type: ChaincodeType::Golang,
            },
            channel: Some("airlinechannel".into()),
            function: "init".into(),
            args: vec![b"ACFT".to_vec(), b"1000".to_vec()],
            targets: vec!["acme-peer1".into(), "acme-peer2".into()],
            tx_id: TransactionId {
                nonce: vec![7; 24],
                creator: b"AcmeMSP".to_vec(),
                id: "ab".repeat(32),
            },
        }
    }

    #[test]
    fn proposal_encoding_is_deterministic() {
        let proposal = sample_proposal();
        let a = to_bytes_canonical(&proposal).unwrap();
        let b = to_bytes_canonical(&proposal.clone()).unwrap();
        assert_eq!(a, b);
        let decoded: Proposal = from_bytes_canonical(&a).unwrap();
        assert_eq!(decoded, proposal);
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let mut bytes = to_bytes_canonical(&sample_proposal()).unwrap();
        bytes.push(0);
        let err = from_bytes_canonical::<Proposal>(&bytes).unwrap_err();
        assert!(err.starts_with("canonical decode failed"));
    }
}
