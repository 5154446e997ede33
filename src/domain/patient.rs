//! Patient input types for the cardiovascular and renal calculators.
//!
//! The calculations assume plausible inputs and never validate them; the
//! application services run the `validate` helpers first.

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::units::{convert_creatinine, CreatinineUnit};

/// Youngest age covered by the SCORE2 tables. Younger patients are looked up
/// as if they were this age.
pub const MIN_TABLE_AGE: u32 = 40;

/// Earliest year accepted as a birth year by [`age_from_entry`].
pub const EARLIEST_BIRTH_YEAR: u32 = 1900;

/// Biological sex as used by the risk equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    #[must_use]
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl std::fmt::Display for Sex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

impl std::str::FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Self::Male),
            "female" | "f" => Ok(Self::Female),
            other => Err(format!("Unknown sex: {other}")),
        }
    }
}

fn default_country() -> String {
    "moldova".to_string()
}

/// Inputs to the SCORE2 / SCORE2-OP cardiovascular calculator.
///
/// Cholesterol values are in mmol/L, blood pressure in mmHg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardioInputs {
    /// Age in whole years
    pub age: u32,

    pub sex: Sex,

    #[serde(default)]
    pub smoker: bool,

    /// Systolic blood pressure (mmHg)
    pub systolic_bp: u32,

    /// Total cholesterol (mmol/L)
    #[serde(default)]
    pub total_cholesterol: Option<f64>,

    /// HDL cholesterol (mmol/L)
    #[serde(default)]
    pub hdl_cholesterol: Option<f64>,

    /// LDL cholesterol (mmol/L)
    #[serde(default)]
    pub ldl_cholesterol: Option<f64>,

    #[serde(default)]
    pub diabetic: bool,

    #[serde(default)]
    pub myocardial_infarction: bool,

    #[serde(default)]
    pub stroke: bool,

    #[serde(default)]
    pub chronic_kidney_disease: bool,

    #[serde(default)]
    pub family_history: bool,

    #[serde(default)]
    pub obesity: bool,

    /// Country of residence, selects the risk region
    #[serde(default = "default_country")]
    pub country: String,
}

impl CardioInputs {
    /// Minimal inputs: everything optional is absent, every flag is false.
    #[must_use]
    pub fn new(age: u32, sex: Sex, systolic_bp: u32) -> Self {
        Self {
            age,
            sex,
            smoker: false,
            systolic_bp,
            total_cholesterol: None,
            hdl_cholesterol: None,
            ldl_cholesterol: None,
            diabetic: false,
            myocardial_infarction: false,
            stroke: false,
            chronic_kidney_disease: false,
            family_history: false,
            obesity: false,
            country: default_country(),
        }
    }

    /// Builder-style setter for total and HDL cholesterol.
    #[must_use]
    pub fn with_lipids(mut self, total: f64, hdl: f64) -> Self {
        self.total_cholesterol = Some(total);
        self.hdl_cholesterol = Some(hdl);
        self
    }

    /// Builder-style setter for LDL cholesterol.
    #[must_use]
    pub fn with_ldl(mut self, ldl: f64) -> Self {
        self.ldl_cholesterol = Some(ldl);
        self
    }

    #[must_use]
    pub fn with_smoker(mut self, smoker: bool) -> Self {
        self.smoker = smoker;
        self
    }

    #[must_use]
    pub fn with_diabetes(mut self, diabetic: bool) -> Self {
        self.diabetic = diabetic;
        self
    }

    /// Non-HDL cholesterol, present only when the official table method can run:
    /// total and HDL both positive and their difference positive.
    #[must_use]
    pub fn non_hdl(&self) -> Option<f64> {
        let total = self.total_cholesterol.filter(|v| *v > 0.0)?;
        let hdl = self.hdl_cholesterol.filter(|v| *v > 0.0)?;
        let non_hdl = total - hdl;
        (non_hdl > 0.0).then_some(non_hdl)
    }

    /// Measured LDL cholesterol, if positive.
    #[must_use]
    pub fn measured_ldl(&self) -> Option<f64> {
        self.ldl_cholesterol.filter(|v| *v > 0.0)
    }

    /// Age used for table lookup, clamped up to [`MIN_TABLE_AGE`].
    #[must_use]
    pub fn lookup_age(&self) -> u32 {
        self.age.max(MIN_TABLE_AGE)
    }

    /// Validate that all values are within plausible clinical ranges.
    ///
    /// # Errors
    /// Returns every violation found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(1..=120).contains(&self.age) {
            errors.push(format!("Age {} out of range [1, 120]", self.age));
        }
        if !(60..=300).contains(&self.systolic_bp) {
            errors.push(format!(
                "Systolic BP {} out of range [60, 300]",
                self.systolic_bp
            ));
        }
        for (name, value) in [
            ("Total cholesterol", self.total_cholesterol),
            ("HDL cholesterol", self.hdl_cholesterol),
            ("LDL cholesterol", self.ldl_cholesterol),
        ] {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0 && v <= 20.0) {
                    errors.push(format!("{name} {v} out of range (0, 20]"));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Inputs to the CKD-EPI 2021 kidney function calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenalInputs {
    /// Age in whole years
    pub age: u32,

    pub sex: Sex,

    /// Serum creatinine, expressed in `unit`
    pub creatinine: f64,

    #[serde(default)]
    pub unit: CreatinineUnit,
}

impl RenalInputs {
    #[must_use]
    pub fn new(age: u32, sex: Sex, creatinine: f64, unit: CreatinineUnit) -> Self {
        Self {
            age,
            sex,
            creatinine,
            unit,
        }
    }

    /// Serum creatinine normalized to mg/dL.
    #[must_use]
    pub fn creatinine_mgdl(&self) -> f64 {
        convert_creatinine(self.creatinine, self.unit, CreatinineUnit::MgDl)
    }

    /// # Errors
    /// Returns every violation found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !(1..=120).contains(&self.age) {
            errors.push(format!("Age {} out of range [1, 120]", self.age));
        }
        if !self.creatinine.is_finite() || self.creatinine <= 0.0 {
            errors.push(format!(
                "Creatinine {} must be a positive number",
                self.creatinine
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Interpret a number typed into the age field.
///
/// Values between [`EARLIEST_BIRTH_YEAR`] and the current year are birth years
/// and are converted to an age; anything else is already an age.
#[must_use]
pub fn age_from_entry(entry: u32) -> u32 {
    let year = u32::try_from(chrono::Utc::now().year()).unwrap_or(0);
    age_from_entry_in_year(entry, year)
}

/// [`age_from_entry`] against an explicit reference year.
#[must_use]
pub fn age_from_entry_in_year(entry: u32, current_year: u32) -> u32 {
    if (EARLIEST_BIRTH_YEAR..=current_year).contains(&entry) {
        current_year - entry
    } else {
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_hdl_requires_both_lipids() {
        let base = CardioInputs::new(55, Sex::Male, 130);
        assert!(base.non_hdl().is_none());

        let only_total = CardioInputs {
            total_cholesterol: Some(5.5),
            ..base.clone()
        };
        assert!(only_total.non_hdl().is_none());

        let both = base.with_lipids(5.5, 1.2);
        let non_hdl = both.non_hdl().expect("Should have non-HDL");
        assert!((non_hdl - 4.3).abs() < 1e-9);
    }

    #[test]
    fn test_non_hdl_rejects_non_positive_difference() {
        let inputs = CardioInputs::new(55, Sex::Female, 130).with_lipids(1.2, 1.2);
        assert!(inputs.non_hdl().is_none());

        let inputs = CardioInputs::new(55, Sex::Female, 130).with_lipids(0.0, 1.2);
        assert!(inputs.non_hdl().is_none());
    }

    #[test]
    fn test_lookup_age_clamps_to_forty() {
        assert_eq!(CardioInputs::new(32, Sex::Male, 120).lookup_age(), 40);
        assert_eq!(CardioInputs::new(47, Sex::Male, 120).lookup_age(), 47);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let json = r#"{"age": 61, "sex": "female", "systolicBp": 145, "ldlCholesterol": 3.4}"#;
        let inputs: CardioInputs = serde_json::from_str(json).expect("Should parse");
        assert_eq!(inputs.sex, Sex::Female);
        assert_eq!(inputs.measured_ldl(), Some(3.4));
        assert!(!inputs.smoker);
        assert_eq!(inputs.country, "moldova");
    }

    #[test]
    fn test_cardio_validation() {
        let valid = CardioInputs::new(55, Sex::Male, 130).with_lipids(5.5, 1.2);
        assert!(valid.validate().is_ok());

        let invalid = CardioInputs {
            total_cholesterol: Some(-1.0),
            ..CardioInputs::new(0, Sex::Male, 20)
        };
        let errors = invalid.validate().expect_err("Should be invalid");
        // age, blood pressure, negative total
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_partial_lipids_are_valid() {
        let total_only = CardioInputs {
            total_cholesterol: Some(5.5),
            ..CardioInputs::new(55, Sex::Male, 130)
        };
        assert!(total_only.validate().is_ok());
        assert!(total_only.non_hdl().is_none());

        let hdl_with_ldl = CardioInputs {
            hdl_cholesterol: Some(1.2),
            ..CardioInputs::new(55, Sex::Male, 130).with_ldl(3.0)
        };
        assert!(hdl_with_ldl.validate().is_ok());
    }

    #[test]
    fn test_renal_validation() {
        assert!(RenalInputs::new(60, Sex::Female, 1.1, CreatinineUnit::MgDl)
            .validate()
            .is_ok());
        assert!(RenalInputs::new(60, Sex::Female, 0.0, CreatinineUnit::MgDl)
            .validate()
            .is_err());
    }

    #[test]
    fn test_renal_creatinine_normalization() {
        let inputs = RenalInputs::new(60, Sex::Male, 88.4, CreatinineUnit::UmolL);
        assert!((inputs.creatinine_mgdl() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_age_from_entry() {
        assert_eq!(age_from_entry_in_year(1970, 2026), 56);
        assert_eq!(age_from_entry_in_year(56, 2026), 56);
        // Future years are not birth years.
        assert_eq!(age_from_entry_in_year(2030, 2026), 2030);
        assert_eq!(age_from_entry_in_year(2026, 2026), 0);
    }

    #[test]
    fn test_sex_parsing() {
        assert_eq!("Female".parse::<Sex>(), Ok(Sex::Female));
        assert_eq!("m".parse::<Sex>(), Ok(Sex::Male));
        assert!("x".parse::<Sex>().is_err());
    }
}
