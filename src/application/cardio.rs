//! Cardiovascular assessment service.
//!
//! Runs the full pipeline for one patient:
//! 1. Validate inputs
//! 2. Score (official chart or LDL-only fallback)
//! 3. Classify
//! 4. Derive the LDL target and required reduction
//! 5. Select recommendation topics

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{
    calculate_score2_risk, estimate_ldl_from_non_hdl, ldl_reduction, recommendations,
    risk_category, target_ldl, CalculationMethod, CardioInputs, CardioTopic, ClassifierContext,
    NonHdlBand, RiskCategory, RiskRegion, RiskResult,
};
use crate::ports::RiskTableStore;
use crate::VitalscoreError;

/// Everything the presentation layer shows for one cardiovascular assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardioAssessment {
    /// Ten-year risk (percent); `None` when there was no usable cholesterol
    pub risk_score: Option<f64>,
    pub method: Option<CalculationMethod>,
    pub non_hdl: Option<f64>,
    /// Chart column the non-HDL value falls in
    pub non_hdl_band: Option<NonHdlBand>,
    pub category: RiskCategory,
    /// Gauge colour for `category`
    pub color: String,
    /// Target LDL cholesterol (mmol/L)
    pub target_ldl: f64,
    /// LDL used for the reduction, measured or estimated from non-HDL
    pub current_ldl: Option<f64>,
    pub ldl_estimated: bool,
    /// Percentage LDL reduction to reach the target
    pub ldl_reduction: u32,
    pub recommendations: Vec<CardioTopic>,
    /// Version of the chart set that produced the score
    pub tables_version: String,
}

/// Service for scoring and classifying cardiovascular risk.
pub struct CardioService<T>
where
    T: RiskTableStore + ?Sized,
{
    store: Arc<T>,
}

impl<T> CardioService<T>
where
    T: RiskTableStore + ?Sized,
{
    /// Create a new cardiovascular service.
    pub fn new(store: Arc<T>) -> Self {
        tracing::debug!(
            source = %store.source(),
            version = store.tables().version(),
            "Cardiovascular service ready"
        );
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &T {
        &self.store
    }

    /// Score only.
    ///
    /// # Errors
    /// Returns an error if the chart set lacks the patient's row.
    pub fn calculate(&self, inputs: &CardioInputs) -> Result<RiskResult, VitalscoreError> {
        Ok(calculate_score2_risk(self.store.tables(), inputs)?)
    }

    /// Validate, score, classify and derive targets.
    ///
    /// With no usable cholesterol there is no score; the category is then
    /// decided by the clinical history alone, as if the score were zero.
    ///
    /// # Errors
    /// Returns `VitalscoreError::Validation` listing every input problem, or a
    /// table error from scoring.
    pub fn assess(&self, inputs: &CardioInputs) -> Result<CardioAssessment, VitalscoreError> {
        inputs
            .validate()
            .map_err(|errors| VitalscoreError::Validation(errors.join("; ")))?;

        tracing::debug!("Step 1: Scoring");
        if inputs.age < inputs.lookup_age() {
            tracing::debug!("Age below chart range, using the youngest band");
        }
        if RiskRegion::for_country(&inputs.country) != self.store.tables().region() {
            tracing::warn!("Patient region differs from the chart set region");
        }
        let result = self.calculate(inputs)?;

        tracing::debug!("Step 2: Classifying");
        let category = risk_category(
            result.risk_score.unwrap_or(0.0),
            &ClassifierContext::from(inputs),
        );

        tracing::debug!("Step 3: Targets");
        let target = target_ldl(category);
        let (current_ldl, ldl_estimated) = current_ldl(inputs, &result, category);
        let reduction = current_ldl.map_or(0, |ldl| ldl_reduction(ldl, target));

        let topics = recommendations(inputs, category);

        tracing::info!(
            method = result.method.map_or("none", |m| match m {
                CalculationMethod::Official => "official",
                CalculationMethod::Simplified => "simplified",
            }),
            category = category.as_key(),
            topics = topics.len(),
            "Cardiovascular risk assessed"
        );

        Ok(CardioAssessment {
            risk_score: result.risk_score,
            method: result.method,
            non_hdl: result.non_hdl,
            non_hdl_band: result.non_hdl.map(NonHdlBand::for_value),
            category,
            color: category.color().to_string(),
            target_ldl: target,
            current_ldl,
            ldl_estimated,
            ldl_reduction: reduction,
            recommendations: topics,
            tables_version: self.store.tables().version().to_string(),
        })
    }
}

/// LDL to measure the reduction from.
///
/// Measured LDL wins. Otherwise, for a chart-scored patient outside the low
/// categories, LDL is estimated from non-HDL.
fn current_ldl(
    inputs: &CardioInputs,
    result: &RiskResult,
    category: RiskCategory,
) -> (Option<f64>, bool) {
    if let Some(ldl) = inputs.measured_ldl() {
        return (Some(ldl), false);
    }
    let estimate = match (result.method, result.non_hdl) {
        (Some(CalculationMethod::Official), Some(non_hdl)) if category.is_elevated() => {
            Some(estimate_ldl_from_non_hdl(non_hdl)).filter(|&ldl| ldl > 0.0)
        }
        _ => None,
    };
    (estimate, estimate.is_some())
}

impl<T> Clone for CardioService<T>
where
    T: RiskTableStore + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}
