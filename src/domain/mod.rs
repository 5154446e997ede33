//! Domain layer: Core clinical types and scoring rules.
//!
//! Pure Rust types and pure functions. Nothing here performs I/O or logging;
//! all types are serializable.

mod advice;
pub mod bands;
mod category;
pub mod interpolate;
mod patient;
mod region;
mod renal;
mod score2;
pub mod simplified;
pub mod tables;
mod targets;
mod units;

pub use advice::{recommendations, CardioTopic};
pub use bands::{AgeBand, BpBand, NonHdlBand, Regime, RiskProfile, TableKey};
pub use category::{risk_category, ClassifierContext, RiskCategory};
pub use patient::{age_from_entry, age_from_entry_in_year, CardioInputs, RenalInputs, Sex};
pub use region::RiskRegion;
pub use renal::{calculate_gfr, ckd_epi_2021, CkdStage, GfrResult, RenalTopic};
pub use score2::{calculate_score2_risk, CalculationMethod, RiskResult};
pub use tables::{RiskRow, RiskTable, TableError, TableSet};
pub use targets::{estimate_ldl_from_non_hdl, ldl_reduction, target_ldl};
pub use units::{convert_creatinine, CreatinineUnit, CREATININE_UMOLL_PER_MGDL};
