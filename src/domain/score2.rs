//! SCORE2 / SCORE2-OP ten-year cardiovascular risk.
//!
//! Method selection is exclusive: the official chart method runs whenever total
//! and HDL cholesterol allow a positive non-HDL value; the LDL-only estimator
//! runs only otherwise; with neither there is no score.

use serde::{Deserialize, Serialize};

use super::bands::RiskProfile;
use super::interpolate::interpolate_risk;
use super::patient::CardioInputs;
use super::region::RiskRegion;
use super::simplified::simplified_risk;
use super::tables::{TableError, TableSet};

/// How a risk score was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationMethod {
    /// Chart lookup with non-HDL interpolation
    Official,
    /// LDL-only approximation
    Simplified,
}

impl std::fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Official => write!(f, "official"),
            Self::Simplified => write!(f, "simplified"),
        }
    }
}

/// Outcome of a risk calculation.
///
/// `risk_score` and `method` are both `None` when the inputs carry neither
/// usable total+HDL nor LDL cholesterol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResult {
    /// Ten-year risk in percent, `[0, 100]`
    pub risk_score: Option<f64>,

    pub method: Option<CalculationMethod>,

    /// Non-HDL cholesterol used by the official method (mmol/L)
    pub non_hdl: Option<f64>,
}

impl RiskResult {
    /// The "insufficient data" outcome.
    #[must_use]
    pub fn insufficient() -> Self {
        Self {
            risk_score: None,
            method: None,
            non_hdl: None,
        }
    }

    #[must_use]
    pub fn has_score(&self) -> bool {
        self.risk_score.is_some()
    }
}

/// Calculate the ten-year risk for `inputs` against `tables`.
///
/// # Errors
/// Returns `TableError::MissingCell` if the chart set lacks the patient's row.
/// Validated chart sets are complete, so this only surfaces for hand-built sets.
pub fn calculate_score2_risk(
    tables: &TableSet,
    inputs: &CardioInputs,
) -> Result<RiskResult, TableError> {
    if let Some(non_hdl) = inputs.non_hdl() {
        let risk = interpolate_risk(
            tables,
            RiskProfile::new(inputs.sex, inputs.smoker),
            inputs.lookup_age(),
            inputs.systolic_bp,
            non_hdl,
        )?;
        return Ok(RiskResult {
            risk_score: Some(risk.clamp(0.0, 100.0)),
            method: Some(CalculationMethod::Official),
            non_hdl: Some(non_hdl),
        });
    }

    if let Some(ldl) = inputs.measured_ldl() {
        return Ok(RiskResult {
            risk_score: Some(simplified_risk(
                inputs,
                ldl,
                RiskRegion::for_country(&inputs.country),
            )),
            method: Some(CalculationMethod::Simplified),
            non_hdl: None,
        });
    }

    Ok(RiskResult::insufficient())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::score2_tables::official_tables;
    use crate::domain::patient::Sex;
    use proptest::prelude::*;

    #[test]
    fn test_reference_patient_uses_official_method() {
        let inputs = CardioInputs::new(55, Sex::Male, 130).with_lipids(5.5, 1.2);
        let result = calculate_score2_risk(official_tables(), &inputs).expect("Should score");

        assert_eq!(result.method, Some(CalculationMethod::Official));
        let non_hdl = result.non_hdl.expect("non-HDL");
        assert!((non_hdl - 4.3).abs() < 1e-9);

        // male_nonsmoker/55-59/120-139 = [10, 11, 13, 15, 15]; 30% of the way from 11 to 13
        let risk = result.risk_score.expect("score");
        assert!((risk - 11.6).abs() < 1e-9, "got {risk}");
    }

    #[test]
    fn test_official_preferred_over_ldl() {
        let inputs = CardioInputs::new(62, Sex::Female, 150)
            .with_lipids(6.0, 1.4)
            .with_ldl(4.0);
        let result = calculate_score2_risk(official_tables(), &inputs).expect("Should score");
        assert_eq!(result.method, Some(CalculationMethod::Official));
    }

    #[test]
    fn test_ldl_fallback() {
        let inputs = CardioInputs::new(45, Sex::Male, 130).with_ldl(2.8);
        let result = calculate_score2_risk(official_tables(), &inputs).expect("Should score");
        assert_eq!(result.method, Some(CalculationMethod::Simplified));
        assert!(result.non_hdl.is_none());
        assert!((result.risk_score.expect("score") - 2.34).abs() < 1e-9);
    }

    #[test]
    fn test_country_selects_ldl_region() {
        let inputs = CardioInputs {
            country: "MD".to_string(),
            ..CardioInputs::new(72, Sex::Female, 150).with_ldl(3.8)
        };
        let result = calculate_score2_risk(official_tables(), &inputs).expect("Should score");
        let expected = simplified_risk(&inputs, 3.8, RiskRegion::for_country("MD"));
        assert_eq!(result.risk_score, Some(expected));
        // 9.0 base * 1.0 bp * 1.1 ldl * 1.2 region
        assert!((expected - 11.88).abs() < 1e-9);
    }

    #[test]
    fn test_total_without_hdl_uses_ldl() {
        let inputs = CardioInputs {
            total_cholesterol: Some(5.5),
            ..CardioInputs::new(55, Sex::Male, 130).with_ldl(3.0)
        };
        let result = calculate_score2_risk(official_tables(), &inputs).expect("Should score");
        assert_eq!(result.method, Some(CalculationMethod::Simplified));
    }

    #[test]
    fn test_unusable_lipids_fall_back_to_ldl() {
        let inputs = CardioInputs::new(45, Sex::Male, 130)
            .with_lipids(1.0, 1.3)
            .with_ldl(2.8);
        let result = calculate_score2_risk(official_tables(), &inputs).expect("Should score");
        assert_eq!(result.method, Some(CalculationMethod::Simplified));
    }

    #[test]
    fn test_no_cholesterol_is_insufficient() {
        let inputs = CardioInputs::new(45, Sex::Male, 130);
        let result = calculate_score2_risk(official_tables(), &inputs).expect("Should run");
        assert_eq!(result, RiskResult::insufficient());
        assert!(!result.has_score());
    }

    #[test]
    fn test_elderly_chart_used_from_seventy() {
        let inputs = CardioInputs::new(70, Sex::Female, 110).with_lipids(4.0, 1.0);
        let result = calculate_score2_risk(official_tables(), &inputs).expect("Should score");
        // female_nonsmoker/70-74/100-119 = [26, 27, 28, 29, 29]; non-HDL 3.0 pins to the first column
        assert_eq!(result.risk_score, Some(26.0));
    }

    #[test]
    fn test_under_forty_clamped() {
        let young = CardioInputs::new(33, Sex::Male, 125).with_lipids(5.0, 1.0);
        let forty = CardioInputs::new(40, Sex::Male, 125).with_lipids(5.0, 1.0);
        let tables = official_tables();
        assert_eq!(
            calculate_score2_risk(tables, &young).expect("score").risk_score,
            calculate_score2_risk(tables, &forty).expect("score").risk_score
        );
    }

    fn sex_strategy() -> impl Strategy<Value = Sex> {
        prop_oneof![Just(Sex::Male), Just(Sex::Female)]
    }

    proptest! {
        #[test]
        fn score_is_a_percentage(
            age in 18u32..105,
            sex in sex_strategy(),
            smoker in any::<bool>(),
            diabetic in any::<bool>(),
            sbp in 80u32..230,
            total in prop::option::of(0.5..12.0f64),
            hdl in prop::option::of(0.3..3.0f64),
            ldl in prop::option::of(0.5..9.0f64),
        ) {
            let inputs = CardioInputs {
                total_cholesterol: total,
                hdl_cholesterol: hdl,
                ldl_cholesterol: ldl,
                ..CardioInputs::new(age, sex, sbp).with_smoker(smoker).with_diabetes(diabetic)
            };
            let result = calculate_score2_risk(official_tables(), &inputs).expect("complete charts");
            if let Some(risk) = result.risk_score {
                prop_assert!((0.0..=100.0).contains(&risk), "risk {} out of range", risk);
            }
            if inputs.non_hdl().is_some() {
                prop_assert_eq!(result.method, Some(CalculationMethod::Official));
            }
        }

        #[test]
        fn risk_never_falls_as_blood_pressure_rises(
            age in 40u32..100,
            sex in sex_strategy(),
            smoker in any::<bool>(),
            sbp in 90u32..200,
            delta in 1u32..60,
            non_hdl in 2.0..9.0f64,
        ) {
            let low = CardioInputs::new(age, sex, sbp)
                .with_smoker(smoker)
                .with_lipids(non_hdl + 1.0, 1.0);
            let high = CardioInputs { systolic_bp: sbp + delta, ..low.clone() };
            let tables = official_tables();
            let low_risk = calculate_score2_risk(tables, &low).expect("score").risk_score.expect("official");
            let high_risk = calculate_score2_risk(tables, &high).expect("score").risk_score.expect("official");
            prop_assert!(high_risk >= low_risk, "{} -> {}", low_risk, high_risk);
        }
    }
}
