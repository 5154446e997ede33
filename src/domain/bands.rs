//! Band definitions that index the SCORE2 / SCORE2-OP risk charts.
//!
//! A chart cell is addressed by a typed [`TableKey`]: sex and smoking status,
//! an age band and a systolic blood pressure band. The fifth dimension,
//! non-HDL cholesterol, is the axis along which a row is interpolated.

use serde::{Deserialize, Serialize};

use super::patient::Sex;

/// Age at which the elderly (SCORE2-OP) chart takes over.
pub const ELDERLY_AGE: u32 = 70;

/// Lower boundaries of the non-HDL cholesterol bands (mmol/L).
pub const NON_HDL_BOUNDARIES: [f64; 5] = [3.0, 4.0, 5.0, 6.0, 7.0];

/// Which chart applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Regime {
    /// SCORE2, ages 40 to 69
    Standard,
    /// SCORE2-OP, ages 70 and over
    Elderly,
}

impl Regime {
    #[must_use]
    pub fn for_age(age: u32) -> Self {
        if age < ELDERLY_AGE {
            Self::Standard
        } else {
            Self::Elderly
        }
    }

    /// Age bands of this chart, youngest first.
    #[must_use]
    pub fn age_bands(&self) -> &'static [AgeBand] {
        match self {
            Self::Standard => &AgeBand::STANDARD,
            Self::Elderly => &AgeBand::ELDERLY,
        }
    }

    /// Name of the published chart.
    #[must_use]
    pub fn chart_name(&self) -> &'static str {
        match self {
            Self::Standard => "SCORE2",
            Self::Elderly => "SCORE2-OP",
        }
    }
}

impl std::fmt::Display for Regime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.chart_name())
    }
}

/// Age band of a chart row group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeBand {
    #[serde(rename = "40-44")]
    From40To44,
    #[serde(rename = "45-49")]
    From45To49,
    #[serde(rename = "50-54")]
    From50To54,
    #[serde(rename = "55-59")]
    From55To59,
    #[serde(rename = "60-64")]
    From60To64,
    #[serde(rename = "65-69")]
    From65To69,
    #[serde(rename = "70-74")]
    From70To74,
    #[serde(rename = "75-79")]
    From75To79,
    #[serde(rename = "80-84")]
    From80To84,
    #[serde(rename = "85-89")]
    From85To89,
    #[serde(rename = "90+")]
    From90,
}

impl AgeBand {
    pub const STANDARD: [AgeBand; 6] = [
        Self::From40To44,
        Self::From45To49,
        Self::From50To54,
        Self::From55To59,
        Self::From60To64,
        Self::From65To69,
    ];

    pub const ELDERLY: [AgeBand; 5] = [
        Self::From70To74,
        Self::From75To79,
        Self::From80To84,
        Self::From85To89,
        Self::From90,
    ];

    /// Band for `age` within `regime`, clamped to the chart's first and last band.
    #[must_use]
    pub fn for_age(age: u32, regime: Regime) -> Self {
        match regime {
            Regime::Standard => match age {
                0..=44 => Self::From40To44,
                45..=49 => Self::From45To49,
                50..=54 => Self::From50To54,
                55..=59 => Self::From55To59,
                60..=64 => Self::From60To64,
                _ => Self::From65To69,
            },
            Regime::Elderly => match age {
                0..=74 => Self::From70To74,
                75..=79 => Self::From75To79,
                80..=84 => Self::From80To84,
                85..=89 => Self::From85To89,
                _ => Self::From90,
            },
        }
    }

    /// Chart this band belongs to.
    #[must_use]
    pub fn regime(&self) -> Regime {
        match self {
            Self::From40To44
            | Self::From45To49
            | Self::From50To54
            | Self::From55To59
            | Self::From60To64
            | Self::From65To69 => Regime::Standard,
            _ => Regime::Elderly,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::From40To44 => "40-44",
            Self::From45To49 => "45-49",
            Self::From50To54 => "50-54",
            Self::From55To59 => "55-59",
            Self::From60To64 => "60-64",
            Self::From65To69 => "65-69",
            Self::From70To74 => "70-74",
            Self::From75To79 => "75-79",
            Self::From80To84 => "80-84",
            Self::From85To89 => "85-89",
            Self::From90 => "90+",
        }
    }
}

impl std::fmt::Display for AgeBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Systolic blood pressure band (mmHg).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BpBand {
    #[serde(rename = "100-119")]
    From100To119,
    #[serde(rename = "120-139")]
    From120To139,
    #[serde(rename = "140-159")]
    From140To159,
    #[serde(rename = "160-179")]
    From160To179,
}

impl BpBand {
    pub const ALL: [BpBand; 4] = [
        Self::From100To119,
        Self::From120To139,
        Self::From140To159,
        Self::From160To179,
    ];

    /// Band for a systolic reading. Readings under 100 fall in the first band
    /// and readings of 180 or more in the last.
    #[must_use]
    pub fn for_systolic(systolic_bp: u32) -> Self {
        match systolic_bp {
            0..=119 => Self::From100To119,
            120..=139 => Self::From120To139,
            140..=159 => Self::From140To159,
            _ => Self::From160To179,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::From100To119 => "100-119",
            Self::From120To139 => "120-139",
            Self::From140To159 => "140-159",
            Self::From160To179 => "160-179",
        }
    }
}

impl std::fmt::Display for BpBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Sex and smoking status: selects one of the four chart panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskProfile {
    FemaleNonsmoker,
    FemaleSmoker,
    MaleNonsmoker,
    MaleSmoker,
}

impl RiskProfile {
    pub const ALL: [RiskProfile; 4] = [
        Self::FemaleNonsmoker,
        Self::FemaleSmoker,
        Self::MaleNonsmoker,
        Self::MaleSmoker,
    ];

    #[must_use]
    pub fn new(sex: Sex, smoker: bool) -> Self {
        match (sex, smoker) {
            (Sex::Female, false) => Self::FemaleNonsmoker,
            (Sex::Female, true) => Self::FemaleSmoker,
            (Sex::Male, false) => Self::MaleNonsmoker,
            (Sex::Male, true) => Self::MaleSmoker,
        }
    }

    #[must_use]
    pub fn sex(&self) -> Sex {
        match self {
            Self::FemaleNonsmoker | Self::FemaleSmoker => Sex::Female,
            Self::MaleNonsmoker | Self::MaleSmoker => Sex::Male,
        }
    }

    #[must_use]
    pub fn smoker(&self) -> bool {
        matches!(self, Self::FemaleSmoker | Self::MaleSmoker)
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::FemaleNonsmoker => "female_nonsmoker",
            Self::FemaleSmoker => "female_smoker",
            Self::MaleNonsmoker => "male_nonsmoker",
            Self::MaleSmoker => "male_smoker",
        }
    }
}

impl std::fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Address of one chart row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableKey {
    pub profile: RiskProfile,
    pub age_band: AgeBand,
    pub bp_band: BpBand,
}

impl TableKey {
    #[must_use]
    pub fn new(profile: RiskProfile, age_band: AgeBand, bp_band: BpBand) -> Self {
        Self {
            profile,
            age_band,
            bp_band,
        }
    }
}

impl std::fmt::Display for TableKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.profile, self.age_band, self.bp_band)
    }
}

/// Non-HDL cholesterol chart column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NonHdlBand {
    #[serde(rename = "3.0-3.9")]
    From3To4,
    #[serde(rename = "4.0-4.9")]
    From4To5,
    #[serde(rename = "5.0-5.9")]
    From5To6,
    #[serde(rename = "6.0-6.9")]
    From6To7,
    #[serde(rename = "7.0+")]
    From7,
}

impl NonHdlBand {
    pub const ALL: [NonHdlBand; 5] = [
        Self::From3To4,
        Self::From4To5,
        Self::From5To6,
        Self::From6To7,
        Self::From7,
    ];

    /// Column containing `non_hdl`; values under 3.0 belong to the first column.
    #[must_use]
    pub fn for_value(non_hdl: f64) -> Self {
        let index = NON_HDL_BOUNDARIES
            .iter()
            .rposition(|&b| non_hdl >= b)
            .unwrap_or(0);
        Self::ALL[index]
    }

    /// Column index within a chart row.
    #[must_use]
    pub fn index(&self) -> usize {
        *self as usize
    }
}
