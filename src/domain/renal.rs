//! CKD-EPI 2021 (race-free) estimated GFR and CKD staging.

use serde::{Deserialize, Serialize};

use super::patient::{RenalInputs, Sex};

/// KDIGO GFR category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CkdStage {
    G1,
    G2,
    G3a,
    G3b,
    G4,
    G5,
}

/// Renal recommendation topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RenalTopic {
    Lifestyle,
    Monitoring,
    RiskFactors,
    Specialist,
    Complications,
    Preparation,
    Replacement,
}

impl RenalTopic {
    #[must_use]
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Lifestyle => "lifestyle",
            Self::Monitoring => "monitoring",
            Self::RiskFactors => "riskFactors",
            Self::Specialist => "specialist",
            Self::Complications => "complications",
            Self::Preparation => "preparation",
            Self::Replacement => "replacement",
        }
    }
}

impl CkdStage {
    /// Stage for a (rounded) GFR value.
    #[must_use]
    pub fn from_gfr(gfr: u32) -> Self {
        match gfr {
            90.. => Self::G1,
            60..=89 => Self::G2,
            45..=59 => Self::G3a,
            30..=44 => Self::G3b,
            15..=29 => Self::G4,
            _ => Self::G5,
        }
    }

    #[must_use]
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::G1 => "G1",
            Self::G2 => "G2",
            Self::G3a => "G3a",
            Self::G3b => "G3b",
            Self::G4 => "G4",
            Self::G5 => "G5",
        }
    }

    /// Interpretation translation key.
    #[must_use]
    pub fn interpretation_key(&self) -> &'static str {
        match self {
            Self::G1 => "normalOrHigh",
            Self::G2 => "mildlyDecreased",
            Self::G3a => "mildToModeratelyDecreased",
            Self::G3b => "moderateToSeverelyDecreased",
            Self::G4 => "severelyDecreased",
            Self::G5 => "kidneyFailure",
        }
    }

    /// English description of the stage.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::G1 => "Normal or high kidney function",
            Self::G2 => "Mildly decreased kidney function",
            Self::G3a => "Mild to moderately decreased kidney function",
            Self::G3b => "Moderately to severely decreased kidney function",
            Self::G4 => "Severely decreased kidney function",
            Self::G5 => "Kidney failure",
        }
    }

    /// Recommendation topics, in display order.
    #[must_use]
    pub fn recommendations(&self) -> &'static [RenalTopic] {
        use RenalTopic::*;
        match self {
            Self::G1 => &[Lifestyle, Monitoring],
            Self::G2 => &[Lifestyle, Monitoring, RiskFactors],
            Self::G3a => &[Lifestyle, Monitoring, RiskFactors, Specialist],
            Self::G3b => &[Lifestyle, Monitoring, RiskFactors, Specialist, Complications],
            Self::G4 => &[Lifestyle, Specialist, Complications, Preparation],
            Self::G5 => &[Specialist, Replacement],
        }
    }
}

impl std::fmt::Display for CkdStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Outcome of a GFR calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GfrResult {
    /// eGFR in mL/min/1.73m², rounded
    pub gfr: u32,
    pub stage: CkdStage,
    pub interpretation_key: String,
    pub recommendation_keys: Vec<RenalTopic>,
}

struct SexCoefficients {
    kappa: f64,
    alpha: f64,
    multiplier: f64,
}

fn coefficients(sex: Sex) -> SexCoefficients {
    match sex {
        Sex::Female => SexCoefficients {
            kappa: 0.7,
            alpha: -0.241,
            multiplier: 1.012,
        },
        Sex::Male => SexCoefficients {
            kappa: 0.9,
            alpha: -0.302,
            multiplier: 1.0,
        },
    }
}

/// Unrounded CKD-EPI 2021 eGFR.
///
/// Creatinine and age must be positive; callers establish that before calling.
#[must_use]
pub fn ckd_epi_2021(creatinine_mgdl: f64, age: u32, sex: Sex) -> f64 {
    let c = coefficients(sex);
    let ratio = creatinine_mgdl / c.kappa;
    142.0
        * ratio.min(1.0).powf(c.alpha)
        * ratio.max(1.0).powf(-1.2)
        * 0.9938_f64.powi(i32::try_from(age).unwrap_or(i32::MAX))
        * c.multiplier
}

/// Estimate GFR and stage chronic kidney disease.
#[must_use]
pub fn calculate_gfr(inputs: &RenalInputs) -> GfrResult {
    let raw = ckd_epi_2021(inputs.creatinine_mgdl(), inputs.age, inputs.sex);
    // eGFR is positive and far below u32::MAX for any positive creatinine.
    let gfr = raw.round().max(0.0) as u32;
    let stage = CkdStage::from_gfr(gfr);

    GfrResult {
        gfr,
        stage,
        interpretation_key: stage.interpretation_key().to_string(),
        recommendation_keys: stage.recommendations().to_vec(),
    }
}
