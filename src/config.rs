//! Environment-driven engine configuration.
//!
//! | Variable | Meaning |
//! |---|---|
//! | `VITALSCORE_TABLES` | JSON chart file overriding the compiled-in charts |
//! | `VITALSCORE_TABLES_SHA256` | expected SHA-256 (hex) of that file |
//! | `VITALSCORE_REQUIRE_PINNED_TABLES` | refuse a chart file without a digest |
//! | `VITALSCORE_LOG_MODE` | `stderr` (default) or `file` |
//! | `VITALSCORE_LOG_FILE` | log path in `file` mode |

use std::path::PathBuf;
use std::sync::Arc;

use crate::adapters::{JsonTableStore, StaticTableStore};
use crate::ports::RiskTableStore;
use crate::VitalscoreError;

const DEFAULT_LOG_FILE: &str = "vitalscore.log";

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogMode {
    #[default]
    Stderr,
    File,
}

impl std::str::FromStr for LogMode {
    type Err = VitalscoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "stderr" => Ok(Self::Stderr),
            "file" => Ok(Self::File),
            other => Err(VitalscoreError::Config(format!(
                "Unknown log mode '{other}' (expected stderr or file)"
            ))),
        }
    }
}

/// Engine settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub tables_path: Option<PathBuf>,
    pub tables_sha256: Option<String>,
    pub require_pinned_tables: bool,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tables_path: None,
            tables_sha256: None,
            require_pinned_tables: false,
            log_mode: LogMode::Stderr,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

fn parse_bool(value: Option<String>) -> bool {
    value.is_some_and(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "yes" | "YES"))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl EngineConfig {
    /// Read the configuration from the process environment.
    ///
    /// # Errors
    /// Returns `VitalscoreError::Config` for an unknown log mode.
    pub fn from_env() -> Result<Self, VitalscoreError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `var`, which maps a variable name to its value.
    ///
    /// # Errors
    /// Returns `VitalscoreError::Config` for an unknown log mode.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, VitalscoreError> {
        let log_mode = var("VITALSCORE_LOG_MODE")
            .map(|v| v.parse::<LogMode>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            tables_path: non_empty(var("VITALSCORE_TABLES")).map(PathBuf::from),
            tables_sha256: non_empty(var("VITALSCORE_TABLES_SHA256")),
            require_pinned_tables: parse_bool(var("VITALSCORE_REQUIRE_PINNED_TABLES")),
            log_mode,
            log_file: non_empty(var("VITALSCORE_LOG_FILE"))
                .map_or_else(|| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from),
        })
    }

    /// Open the configured chart store.
    ///
    /// # Errors
    /// Fails if a chart file is configured but cannot be loaded or verified, or
    /// if pinning is required and no digest is configured.
    pub fn table_store(&self) -> Result<Arc<dyn RiskTableStore>, VitalscoreError> {
        let Some(path) = &self.tables_path else {
            tracing::info!("Using embedded risk charts");
            return Ok(Arc::new(StaticTableStore::new()));
        };

        if self.require_pinned_tables && self.tables_sha256.is_none() {
            return Err(VitalscoreError::Config(
                "VITALSCORE_TABLES is set but VITALSCORE_TABLES_SHA256 is missing".to_string(),
            ));
        }
        if self.tables_sha256.is_none() {
            tracing::warn!("Chart file loaded without a pinned digest");
        }

        let store = JsonTableStore::load(path, self.tables_sha256.as_deref())?;
        Ok(Arc::new(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::digest::canonical_json;
    use crate::adapters::official_tables;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::from_vars(vars(&[])).expect("config");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.log_mode, LogMode::Stderr);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = EngineConfig::from_vars(vars(&[
            ("VITALSCORE_TABLES", "/etc/vitalscore/charts.json"),
            ("VITALSCORE_TABLES_SHA256", " abc123 "),
            ("VITALSCORE_REQUIRE_PINNED_TABLES", "yes"),
            ("VITALSCORE_LOG_MODE", "FILE"),
            ("VITALSCORE_LOG_FILE", "/var/log/vitalscore.log"),
        ]))
        .expect("config");
        assert_eq!(
            config.tables_path,
            Some(PathBuf::from("/etc/vitalscore/charts.json"))
        );
        assert_eq!(config.tables_sha256.as_deref(), Some("abc123"));
        assert!(config.require_pinned_tables);
        assert_eq!(config.log_mode, LogMode::File);
        assert_eq!(config.log_file, PathBuf::from("/var/log/vitalscore.log"));
    }

    #[test]
    fn test_unknown_log_mode_rejected() {
        let err = EngineConfig::from_vars(vars(&[("VITALSCORE_LOG_MODE", "syslog")]))
            .expect_err("Should fail");
        assert!(err.to_string().contains("syslog"));
    }

    #[test]
    fn test_embedded_store_by_default() {
        let store = EngineConfig::default().table_store().expect("store");
        assert!(store.source().starts_with("embedded:"));
    }

    #[test]
    fn test_file_store_with_digest() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("charts.json");
        let bytes = canonical_json(official_tables()).expect("encode");
        std::fs::write(&path, &bytes).expect("write");

        let config = EngineConfig {
            tables_path: Some(path),
            tables_sha256: Some(crate::adapters::digest::sha256_hex_bytes(&bytes)),
            require_pinned_tables: true,
            ..EngineConfig::default()
        };
        let store = config.table_store().expect("store");
        assert!(store.source().starts_with("file:"));
    }

    #[test]
    fn test_pinning_required() {
        let config = EngineConfig {
            tables_path: Some(PathBuf::from("charts.json")),
            require_pinned_tables: true,
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.table_store(),
            Err(VitalscoreError::Config(_))
        ));
    }
}
