//! crates/rf_io/src/hasher.rs
//!
//! SHA-256 digests for plans and artifacts.
//!
//! - `sha256_canonical(..)` hashes JSON **values/structs** through `canonical_json`.
//! - `sha256_hex(..)` hashes **raw bytes**.
//!
//! Hex digests are always lowercase, 64 chars.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::canonical_json::to_canonical_bytes;
use crate::IoResult;

/// Lowercase hex SHA-256 of raw bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Lowercase hex SHA-256 of the canonical JSON form of `value`.
pub fn sha256_canonical<T: Serialize>(value: &T) -> IoResult<String> {
    let bytes = to_canonical_bytes(value)?;
    Ok(sha256_hex(&bytes))
}

/// `true` iff `s` is a lowercase 64-char hex digest.
pub fn is_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|c| matches!(c, b'0'..=b'9' | b'a'..=b'f'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn canonical_hash_ignores_key_order() {
        let a = json!({"x": 1, "y": [1, 2]});
        let b = json!({"y": [1, 2], "x": 1});
        let ha = sha256_canonical(&a).unwrap();
        assert_eq!(ha, sha256_canonical(&b).unwrap());
        assert!(is_sha256_hex(&ha));
    }
}
