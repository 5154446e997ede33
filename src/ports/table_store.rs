//! Table store port: Trait for access to the SCORE2 chart data.
//!
//! The application never reaches for chart data through globals; a store is
//! built once at startup and handed to the services that need it.

use crate::domain::TableSet;

/// Read-only source of a validated chart set.
///
/// Implementations are immutable after construction, so a store can be shared
/// between threads behind an `Arc` without locking.
pub trait RiskTableStore: Send + Sync {
    /// The chart set served by this store.
    fn tables(&self) -> &TableSet;

    /// SHA-256 (hex) of the chart data as loaded, if the store knows it.
    fn fingerprint(&self) -> Option<&str> {
        None
    }

    /// Human-readable description of where the charts came from.
    fn source(&self) -> String;
}
