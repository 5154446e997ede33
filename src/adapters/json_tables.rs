//! JSON file table store.
//!
//! Loads a chart set written in the canonical nested-map layout (see
//! [`crate::domain::tables`]). The file is hashed before it is parsed, so a
//! pinned digest rejects a tampered file without ever deserializing it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::TableSet;
use crate::ports::RiskTableStore;
use crate::VitalscoreError;

use super::digest::{sha256_hex_bytes, verify_digest};

/// Table store backed by a JSON file read once at construction.
#[derive(Debug, Clone)]
pub struct JsonTableStore {
    path: PathBuf,
    tables: TableSet,
    fingerprint: String,
}

impl JsonTableStore {
    /// Read, verify and validate a chart file.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read,
    /// `TableError::DigestMismatch` if `expected_sha256` is given and differs,
    /// or a serialization error if the file is not a complete chart set.
    pub fn load(path: impl AsRef<Path>, expected_sha256: Option<&str>) -> crate::Result<Self> {
        let path = path.as_ref().to_path_buf();
        let bytes = fs::read(&path)?;
        let fingerprint = sha256_hex_bytes(&bytes);

        if let Some(expected) = expected_sha256 {
            verify_digest(expected, &fingerprint)?;
        }

        let tables: TableSet = serde_json::from_slice(&bytes)?;

        tracing::info!(
            version = tables.version(),
            fingerprint = %&fingerprint[..12],
            pinned = expected_sha256.is_some(),
            "Loaded risk charts from file"
        );

        Ok(Self {
            path,
            tables,
            fingerprint,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RiskTableStore for JsonTableStore {
    fn tables(&self) -> &TableSet {
        &self.tables
    }

    fn fingerprint(&self) -> Option<&str> {
        Some(&self.fingerprint)
    }

    fn source(&self) -> String {
        format!("file:{} ({})", self.path.display(), self.tables.version())
    }
}

impl TryFrom<&Path> for JsonTableStore {
    type Error = VitalscoreError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        Self::load(path, None)
    }
}
