//! Kidney function assessment service.

use serde::{Deserialize, Serialize};

use crate::domain::{
    calculate_gfr, convert_creatinine, CkdStage, CreatinineUnit, RenalInputs, RenalTopic,
};
use crate::VitalscoreError;

/// eGFR result with the creatinine reported in both units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GfrAssessment {
    /// eGFR in mL/min/1.73m², rounded
    pub gfr: u32,
    pub stage: CkdStage,
    pub stage_description: String,
    pub interpretation_key: String,
    pub recommendation_keys: Vec<RenalTopic>,
    pub creatinine_mgdl: f64,
    pub creatinine_umoll: f64,
}

/// Stateless CKD-EPI 2021 service.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenalService;

impl RenalService {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate inputs, estimate GFR and stage it.
    ///
    /// # Errors
    /// Returns `VitalscoreError::Validation` listing every input problem.
    pub fn assess(&self, inputs: &RenalInputs) -> Result<GfrAssessment, VitalscoreError> {
        inputs
            .validate()
            .map_err(|errors| VitalscoreError::Validation(errors.join("; ")))?;

        let result = calculate_gfr(inputs);
        tracing::info!(
            stage = result.stage.as_key(),
            unit = inputs.unit.as_key(),
            "Kidney function assessed"
        );

        Ok(GfrAssessment {
            gfr: result.gfr,
            stage: result.stage,
            stage_description: result.stage.description().to_string(),
            interpretation_key: result.interpretation_key,
            recommendation_keys: result.recommendation_keys,
            creatinine_mgdl: inputs.creatinine_mgdl(),
            creatinine_umoll: convert_creatinine(
                inputs.creatinine,
                inputs.unit,
                CreatinineUnit::UmolL,
            ),
        })
    }
}
