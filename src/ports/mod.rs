//! Ports layer: Trait definitions for external operations.
//!
//! Following Hexagonal Architecture, these traits define the boundaries
//! between the scoring engine and where its chart data comes from.

mod table_store;

pub use table_store::RiskTableStore;
