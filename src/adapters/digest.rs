//! Canonical chart encoding and SHA-256 fingerprints.
//!
//! The canonical encoding is pretty-printed JSON with sorted keys (charts are
//! serialized through ordered maps), so a chart file written by
//! `export_tables` hashes to the same fingerprint as the in-memory set.

use sha2::{Digest, Sha256};

use crate::domain::{TableError, TableSet};

/// Lowercase hex SHA-256 of `bytes`.
#[must_use]
pub fn sha256_hex_bytes(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Canonical JSON bytes of a chart set.
///
/// # Errors
/// Returns `TableError::Serialization` if encoding fails.
pub fn canonical_json(tables: &TableSet) -> Result<Vec<u8>, TableError> {
    let mut bytes =
        serde_json::to_vec_pretty(tables).map_err(|e| TableError::Serialization(e.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Fingerprint of a chart set's canonical encoding.
///
/// # Errors
/// Returns `TableError::Serialization` if encoding fails.
pub fn table_fingerprint(tables: &TableSet) -> Result<String, TableError> {
    canonical_json(tables).map(|bytes| sha256_hex_bytes(&bytes))
}

/// Compare an expected digest against an actual one.
///
/// Case and surrounding whitespace in `expected` are ignored.
///
/// # Errors
/// Returns `TableError::DigestMismatch` when the digests differ.
pub fn verify_digest(expected: &str, actual: &str) -> Result<(), TableError> {
    if expected.trim().eq_ignore_ascii_case(actual) {
        Ok(())
    } else {
        Err(TableError::DigestMismatch {
            expected: expected.trim().to_ascii_lowercase(),
            actual: actual.to_string(),
        })
    }
}
