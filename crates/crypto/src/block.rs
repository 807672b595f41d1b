// Path: crates/crypto/src/block.rs
//! Block header hashing.
//!
//! The ledger hashes a header as `SHA-256(DER(SEQUENCE { INTEGER number,
//! OCTET STRING previous_hash, OCTET STRING data_hash }))`. Field order and
//! the minimal integer encoding are part of that contract: any deviation
//! yields a different digest and a false integrity failure.

use crate::algorithms::hash::sha256;
use crate::der;
use crate::error::CryptoError;
use ledgerops_types::app::BlockHeader;

fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, CryptoError> {
    hex::decode(value).map_err(|e| CryptoError::InvalidHex {
        field,
        reason: e.to_string(),
    })
}

/// The DER bytes the header hash is computed over.
pub fn encode_block_header(header: &BlockHeader) -> Result<Vec<u8>, CryptoError> {
    let previous = decode_hex("previous_hash", &header.previous_hash)?;
    let data = decode_hex("data_hash", &header.data_hash)?;
    Ok(der::sequence(&[
        der::integer(header.number),
        der::octet_string(&previous),
        der::octet_string(&data),
    ]))
}

/// Computes the lowercase hex header hash of `header`.
pub fn block_header_hash(header: &BlockHeader) -> Result<String, CryptoError> {
    let encoded = encode_block_header(header)?;
    Ok(hex::encode(sha256(&encoded)))
}

/// Recomputes the header hash and compares it with `expected` (hex, any case).
///
/// Returns the recomputed hash on success. A mismatch is reported as
/// `CryptoError::EncodingMismatch` and never corrected.
pub fn verify_block_header(header: &BlockHeader, expected: &str) -> Result<String, CryptoError> {
    let computed = block_header_hash(header)?;
    if !computed.eq_ignore_ascii_case(expected) {
        log::warn!(
            "Header hash mismatch for block {}: expected {}, computed {}",
            header.number,
            expected,
            computed
        );
        return Err(CryptoError::EncodingMismatch {
            expected: expected.to_string(),
            computed,
        });
    }
    Ok(computed)
}

/// Checks that `header` links to `predecessor`: its `previous_hash` must equal
/// the predecessor's recomputed header hash and its number must follow.
///
/// Returns the predecessor's recomputed hash.
pub fn verify_chain_link(
    predecessor: &BlockHeader,
    header: &BlockHeader,
) -> Result<String, CryptoError> {
    if predecessor.number.checked_add(1) != Some(header.number) {
        return Err(CryptoError::EncodingMismatch {
            expected: format!("block {}", predecessor.number.saturating_add(1)),
            computed: format!("block {}", header.number),
        });
    }
    verify_block_header(predecessor, &header.previous_hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(number: u64, previous_hash: &str, data_hash: &str) -> BlockHeader {
        BlockHeader {
            number,
            previous_hash: previous_hash.to_string(),
            data_hash: data_hash.to_string(),
        }
    }

    #[test]
    fn known_header_hashes() {
        let h = header(5, &"ab".repeat(32), &"cd".repeat(32));
        assert_eq!(
            block_header_hash(&h).unwrap(),
            "8601e458e198b3e299388546a3ab4dfb1af4bd8175294c2f6c97dc8eb86fba9f"
        );

        let genesis = header(0, "", &"ef".repeat(32));
        assert_eq!(
            block_header_hash(&genesis).unwrap(),
            "378fafb66c8a2a3974153619c40a512694d17538699d369a6053761aa4a923ef"
        );

        let short = header(128, "ab", "cd");
        assert_eq!(
            hex::encode(encode_block_header(&short).unwrap()),
            "300a020200800401ab0401cd"
        );
        assert_eq!(
            block_header_hash(&short).unwrap(),
            "f2b95b190145c29eeb746e131cf9b6b05632a2f981f9bf9aba51a4dc69abada9"
        );
    }

    #[test]
    fn hashing_is_idempotent() {
        let h = header(5, &"ab".repeat(32), &"cd".repeat(32));
        let first = block_header_hash(&h).unwrap();
        let second = block_header_hash(&h).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn changing_any_field_changes_the_digest() {
        let base = header(5, &"ab".repeat(32), &"cd".repeat(32));
        let digest = block_header_hash(&base).unwrap();

        let mut number = base.clone();
        number.number = 1;
        assert_eq!(
            block_header_hash(&number).unwrap(),
            "78460413701be2e9faf0353f40b06eb118bd68aaa1190ca631ae04129d952487"
        );

        let mut previous = base.clone();
        previous.previous_hash = "ac".repeat(32);
        let mut data = base.clone();
        data.data_hash = "ce".repeat(32);
        let mut swapped = base.clone();
        std::mem::swap(&mut swapped.previous_hash, &mut swapped.data_hash);

        let digests = [
            digest,
            block_header_hash(&number).unwrap(),
            block_header_hash(&previous).unwrap(),
            block_header_hash(&data).unwrap(),
            block_header_hash(&swapped).unwrap(),
        ];
        for (i, a) in digests.iter().enumerate() {
            for b in digests.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn verify_accepts_uppercase_and_reports_mismatch() {
        let h = header(5, "ab", "cd");
        let expected = "898F3BF703DC6244DEC082A766EEA29472E231988F363C20FB1C2434676B8185";
        assert_eq!(
            verify_block_header(&h, expected).unwrap(),
            expected.to_lowercase()
        );

        let err = verify_block_header(&h, &"00".repeat(32)).unwrap_err();
        assert!(matches!(err, CryptoError::EncodingMismatch { .. }));
    }

    #[test]
    fn malformed_hex_is_rejected() {
        let err = block_header_hash(&header(1, "zz", "cd")).unwrap_err();
        assert!(matches!(
            err,
            CryptoError::InvalidHex {
                field: "previous_hash",
                ..
            }
        ));
    }

    #[test]
    fn chain_link_follows_previous_hash() {
        let genesis = header(0, "", &"ef".repeat(32));
        let genesis_hash = block_header_hash(&genesis).unwrap();
        let next = header(1, &genesis_hash, &"12".repeat(32));
        assert_eq!(verify_chain_link(&genesis, &next).unwrap(), genesis_hash);

        let tampered = header(1, &"00".repeat(32), &"12".repeat(32));
        assert!(verify_chain_link(&genesis, &tampered).is_err());

        let gap = header(2, &genesis_hash, &"12".repeat(32));
        assert!(verify_chain_link(&genesis, &gap).is_err());
    }
}
