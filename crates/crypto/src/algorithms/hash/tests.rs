//! Tests for hash function implementations

use super::{sha256, SHA256_LEN};

#[test]
fn test_sha256_is_deterministic() {
    let message = b"test message";
    let digest = sha256(message);

    assert_eq!(digest.len(), SHA256_LEN);
    assert_eq!(digest, sha256(message.to_vec()));
    assert_ne!(digest, sha256(b"test messagf"));
}

#[test]
fn test_sha256_known_vector() {
    // SHA-256("abc") from FIPS 180-2.
    assert_eq!(
        hex::encode(sha256(b"abc")),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}
