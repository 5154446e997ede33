//! Cardiovascular risk regions.

use serde::{Deserialize, Serialize};

use super::bands::Regime;

/// ESC risk region a chart set is calibrated for.
///
/// Only the very-high-risk charts are carried; every supported country maps
/// to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum RiskRegion {
    #[default]
    VeryHigh,
}

impl RiskRegion {
    /// Region for a country name or ISO code.
    #[must_use]
    pub fn for_country(country: &str) -> Self {
        match country.trim().to_ascii_lowercase().as_str() {
            "moldova" | "md" | "mda" => Self::VeryHigh,
            // Unlisted countries get the most conservative charts.
            _ => Self::VeryHigh,
        }
    }

    /// Regional calibration factor of the LDL-only estimator.
    #[must_use]
    pub fn simplified_multiplier(&self, regime: Regime) -> f64 {
        match (self, regime) {
            (Self::VeryHigh, Regime::Standard) => 1.3,
            (Self::VeryHigh, Regime::Elderly) => 1.2,
        }
    }
}

impl std::fmt::Display for RiskRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VeryHigh => write!(f, "very high risk"),
        }
    }
}
