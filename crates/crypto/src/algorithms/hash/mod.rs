// Path: crates/crypto/src/algorithms/hash/mod.rs
//! Cryptographic hash functions

use sha2::{Digest, Sha256};

/// Size of a SHA-256 digest in bytes.
pub const SHA256_LEN: usize = 32;

/// Create a SHA-256 hash of any type that can be referenced as bytes
pub fn sha256<T: AsRef<[u8]>>(data: T) -> [u8; SHA256_LEN] {
    Sha256::digest(data.as_ref()).into()
}

#[cfg(test)]
mod tests;
