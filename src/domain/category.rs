//! Cardiovascular risk categories.

use serde::{Deserialize, Serialize};

use super::patient::CardioInputs;

/// Discrete cardiovascular risk category.
///
/// Ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RiskCategory {
    VeryLow,
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskCategory {
    /// Translation key used by the presentation layer.
    #[must_use]
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::VeryLow => "veryLow",
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::VeryHigh => "veryHigh",
        }
    }

    /// Gauge colour (hex).
    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            Self::VeryLow | Self::Low => "#10b981",
            Self::Moderate => "#f59e0b",
            Self::High => "#ef4444",
            Self::VeryHigh => "#7f1d1d",
        }
    }

    /// Whether lipid-lowering beyond lifestyle measures is in play.
    #[must_use]
    pub fn is_elevated(&self) -> bool {
        *self >= Self::Moderate
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VeryLow => write!(f, "VERY LOW"),
            Self::Low => write!(f, "LOW"),
            Self::Moderate => write!(f, "MODERATE"),
            Self::High => write!(f, "HIGH"),
            Self::VeryHigh => write!(f, "VERY HIGH"),
        }
    }
}

/// The patient facts the classifier needs besides the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierContext {
    pub age: u32,
    pub myocardial_infarction: bool,
    pub stroke: bool,
    pub chronic_kidney_disease: bool,
    pub diabetic: bool,
}

impl ClassifierContext {
    /// Whether any established-disease flag is set.
    #[must_use]
    pub fn has_established_disease(&self) -> bool {
        self.myocardial_infarction || self.stroke || self.chronic_kidney_disease
    }
}

impl From<&CardioInputs> for ClassifierContext {
    fn from(inputs: &CardioInputs) -> Self {
        Self {
            age: inputs.age,
            myocardial_infarction: inputs.myocardial_infarction,
            stroke: inputs.stroke,
            chronic_kidney_disease: inputs.chronic_kidney_disease,
            diabetic: inputs.diabetic,
        }
    }
}

/// Classify a ten-year risk (percent).
///
/// Rules apply in priority order: established disease, then diabetes, then
/// age-banded thresholds. Patients aged 70+ have no "high" tier.
#[must_use]
pub fn risk_category(risk: f64, ctx: &ClassifierContext) -> RiskCategory {
    if ctx.has_established_disease() {
        return RiskCategory::VeryHigh;
    }

    if ctx.diabetic {
        return if ctx.age >= 50 || risk >= 7.5 {
            RiskCategory::VeryHigh
        } else {
            RiskCategory::High
        };
    }

    let (low, moderate, high) = match ctx.age {
        0..=49 => (2.5, 7.5, Some(15.0)),
        50..=69 => (5.0, 10.0, Some(15.0)),
        _ => (7.5, 15.0, None),
    };

    if risk < low {
        RiskCategory::Low
    } else if risk < moderate {
        RiskCategory::Moderate
    } else if high.is_some_and(|h| risk < h) {
        RiskCategory::High
    } else {
        RiskCategory::VeryHigh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(age: u32) -> ClassifierContext {
        ClassifierContext {
            age,
            ..Default::default()
        }
    }

    #[test]
    fn test_established_disease_overrides_score() {
        for flags in [(true, false, false), (false, true, false), (false, false, true)] {
            let c = ClassifierContext {
                age: 42,
                myocardial_infarction: flags.0,
                stroke: flags.1,
                chronic_kidney_disease: flags.2,
                diabetic: false,
            };
            assert_eq!(risk_category(0.5, &c), RiskCategory::VeryHigh);
        }
    }

    #[test]
    fn test_diabetic_over_fifty_is_very_high() {
        let c = ClassifierContext {
            diabetic: true,
            ..ctx(52)
        };
        assert_eq!(risk_category(3.0, &c), RiskCategory::VeryHigh);
    }

    #[test]
    fn test_young_diabetic() {
        let c = ClassifierContext {
            diabetic: true,
            ..ctx(45)
        };
        assert_eq!(risk_category(3.0, &c), RiskCategory::High);
        assert_eq!(risk_category(7.5, &c), RiskCategory::VeryHigh);
    }

    #[test]
    fn test_under_fifty_thresholds() {
        let c = ctx(45);
        assert_eq!(risk_category(2.4, &c), RiskCategory::Low);
        assert_eq!(risk_category(2.5, &c), RiskCategory::Moderate);
        assert_eq!(risk_category(7.5, &c), RiskCategory::High);
        assert_eq!(risk_category(15.0, &c), RiskCategory::VeryHigh);
    }

    #[test]
    fn test_fifty_to_sixty_nine_thresholds() {
        let c = ctx(55);
        assert_eq!(risk_category(4.9, &c), RiskCategory::Low);
        assert_eq!(risk_category(5.0, &c), RiskCategory::Moderate);
        assert_eq!(risk_category(11.6, &c), RiskCategory::High);
        assert_eq!(risk_category(15.0, &c), RiskCategory::VeryHigh);
    }

    #[test]
    fn test_seventy_plus_has_no_high_tier() {
        let c = ctx(75);
        assert_eq!(risk_category(7.4, &c), RiskCategory::Low);
        assert_eq!(risk_category(7.5, &c), RiskCategory::Moderate);
        assert_eq!(risk_category(14.9, &c), RiskCategory::Moderate);
        assert_eq!(risk_category(15.0, &c), RiskCategory::VeryHigh);
        for risk in [0.0, 5.0, 10.0, 20.0, 60.0] {
            assert_ne!(risk_category(risk, &c), RiskCategory::High);
        }
    }

    #[test]
    fn test_context_from_inputs() {
        let mut inputs = CardioInputs::new(66, crate::domain::Sex::Female, 120);
        inputs.stroke = true;
        let c = ClassifierContext::from(&inputs);
        assert_eq!(c.age, 66);
        assert!(c.stroke);
        assert!(c.has_established_disease());
        assert!(!c.diabetic);
        assert!(!ClassifierContext::default().has_established_disease());
    }

    #[test]
    fn test_keys_and_ordering() {
        assert_eq!(RiskCategory::VeryHigh.as_key(), "veryHigh");
        assert!(RiskCategory::High > RiskCategory::Moderate);
        assert!(!RiskCategory::Low.is_elevated());
        assert!(RiskCategory::Moderate.is_elevated());
        let json = serde_json::to_string(&RiskCategory::VeryLow).expect("serialize");
        assert_eq!(json, "\"veryLow\"");
    }
}
