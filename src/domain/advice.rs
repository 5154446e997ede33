//! Cardiovascular recommendation topics.

use serde::{Deserialize, Serialize};

use super::category::RiskCategory;
use super::patient::CardioInputs;

/// Systolic pressure (mmHg) from which blood pressure control is recommended.
pub const BP_CONTROL_THRESHOLD: u32 = 140;

/// Recommendation topic; the presentation layer owns the prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CardioTopic {
    PhysicalActivity,
    Diet,
    SmokingCessation,
    GlucoseControl,
    BloodPressureControl,
    WeightReduction,
}

impl CardioTopic {
    #[must_use]
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::PhysicalActivity => "physicalActivity",
            Self::Diet => "diet",
            Self::SmokingCessation => "smokingCessation",
            Self::GlucoseControl => "glucoseControl",
            Self::BloodPressureControl => "bloodPressureControl",
            Self::WeightReduction => "weightReduction",
        }
    }
}

/// Recommendation topics for a patient, in a fixed order.
///
/// The category does not currently change the selection; it is part of the
/// contract so category-specific topics can be added without a signature change.
#[must_use]
pub fn recommendations(inputs: &CardioInputs, _category: RiskCategory) -> Vec<CardioTopic> {
    let mut topics = vec![CardioTopic::PhysicalActivity, CardioTopic::Diet];
    if inputs.smoker {
        topics.push(CardioTopic::SmokingCessation);
    }
    if inputs.diabetic {
        topics.push(CardioTopic::GlucoseControl);
    }
    if inputs.systolic_bp >= BP_CONTROL_THRESHOLD {
        topics.push(CardioTopic::BloodPressureControl);
    }
    if inputs.obesity {
        topics.push(CardioTopic::WeightReduction);
    }
    topics
}
