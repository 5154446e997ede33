//! Laboratory unit conversion.

use serde::{Deserialize, Serialize};

/// µmol/L per mg/dL of serum creatinine.
pub const CREATININE_UMOLL_PER_MGDL: f64 = 88.4;

/// Unit a serum creatinine value is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CreatinineUnit {
    /// Milligrams per decilitre
    #[default]
    #[serde(rename = "mgdl")]
    MgDl,
    /// Micromoles per litre
    #[serde(rename = "umoll")]
    UmolL,
}

impl CreatinineUnit {
    /// Short key used by the presentation layer.
    #[must_use]
    pub fn as_key(&self) -> &'static str {
        match self {
            Self::MgDl => "mgdl",
            Self::UmolL => "umoll",
        }
    }
}

impl std::fmt::Display for CreatinineUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MgDl => write!(f, "mg/dL"),
            Self::UmolL => write!(f, "µmol/L"),
        }
    }
}

impl std::str::FromStr for CreatinineUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mgdl" | "mg/dl" => Ok(Self::MgDl),
            "umoll" | "umol/l" | "µmol/l" => Ok(Self::UmolL),
            other => Err(format!("Unknown creatinine unit: {other}")),
        }
    }
}

/// Convert a creatinine value between units.
///
/// Pure arithmetic: identity when the units match. Behaviour for negative
/// values is left to the caller.
#[must_use]
pub fn convert_creatinine(value: f64, from: CreatinineUnit, to: CreatinineUnit) -> f64 {
    match (from, to) {
        (CreatinineUnit::MgDl, CreatinineUnit::UmolL) => value * CREATININE_UMOLL_PER_MGDL,
        (CreatinineUnit::UmolL, CreatinineUnit::MgDl) => value / CREATININE_UMOLL_PER_MGDL,
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_mgdl_to_umoll() {
        let v = convert_creatinine(1.0, CreatinineUnit::MgDl, CreatinineUnit::UmolL);
        assert!((v - 88.4).abs() < 1e-12);
    }

    #[test]
    fn test_umoll_to_mgdl() {
        let v = convert_creatinine(88.4, CreatinineUnit::UmolL, CreatinineUnit::MgDl);
        assert!((v - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_identity() {
        assert_eq!(
            convert_creatinine(1.7, CreatinineUnit::UmolL, CreatinineUnit::UmolL),
            1.7
        );
        assert_eq!(
            convert_creatinine(1.7, CreatinineUnit::MgDl, CreatinineUnit::MgDl),
            1.7
        );
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("mgdl".parse::<CreatinineUnit>(), Ok(CreatinineUnit::MgDl));
        assert_eq!("µmol/L".parse::<CreatinineUnit>(), Ok(CreatinineUnit::UmolL));
        assert!("mmol".parse::<CreatinineUnit>().is_err());
    }

    #[test]
    fn test_unit_serde_keys() {
        let json = serde_json::to_string(&CreatinineUnit::UmolL).expect("serialize");
        assert_eq!(json, "\"umoll\"");
    }

    proptest! {
        #[test]
        fn round_trip_is_identity(x in 0.01..30.0f64) {
            let there = convert_creatinine(x, CreatinineUnit::MgDl, CreatinineUnit::UmolL);
            let back = convert_creatinine(there, CreatinineUnit::UmolL, CreatinineUnit::MgDl);
            prop_assert!((back - x).abs() < 1e-9, "{} became {}", x, back);
        }
    }
}
