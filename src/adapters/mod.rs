//! Adapters layer: Concrete implementations of ports.
//!
//! - `score2_tables`: compiled-in SCORE2/SCORE2-OP charts
//! - `json_tables`: chart sets loaded from JSON files
//! - `digest`: canonical chart encoding and SHA-256 fingerprints
//! - `sanitize`: identifier filtering for logs

pub mod digest;
pub mod json_tables;
pub mod sanitize;
pub mod score2_tables;

pub use json_tables::JsonTableStore;
pub use score2_tables::{official_tables, StaticTableStore};
