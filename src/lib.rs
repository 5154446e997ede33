//! # Vitalscore
//!
//! Table-driven cardiovascular and kidney function risk engine.
//!
//! This crate provides:
//! - SCORE2 / SCORE2-OP ten-year cardiovascular risk, with an LDL-only fallback
//! - risk categories, LDL targets and recommendation topics
//! - CKD-EPI 2021 (race-free) eGFR with KDIGO staging
//!
//! ## Architecture
//!
//! The crate follows Hexagonal Architecture:
//! - `domain`: Pure clinical types and calculations
//! - `ports`: Trait definitions for chart data access
//! - `adapters`: Compiled-in and JSON chart stores, log sanitization
//! - `application`: Assessment services orchestrating domain and ports
//! - `config`: Environment-driven settings

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use application::{CardioAssessment, CardioService, GfrAssessment, RenalService};
pub use config::EngineConfig;
pub use domain::{
    calculate_gfr, calculate_score2_risk, convert_creatinine, ldl_reduction, recommendations,
    risk_category, target_ldl, CalculationMethod, CardioInputs, CkdStage, CreatinineUnit,
    GfrResult, RenalInputs, RiskCategory, RiskResult, Sex, TableSet,
};

/// Result type for Vitalscore operations
pub type Result<T> = std::result::Result<T, VitalscoreError>;

/// Main error type for Vitalscore
#[derive(Debug, thiserror::Error)]
pub enum VitalscoreError {
    #[error("Risk chart error: {0}")]
    Table(#[from] domain::TableError),

    #[error("Invalid patient data: {0}")]
    Validation(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
