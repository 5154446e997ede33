//! Risk chart data model.
//!
//! A [`TableSet`] holds the two SCORE2 charts (standard and elderly) for one
//! risk region. Charts are validated on construction: every cell must be
//! present, belong to the right age regime, and hold finite percentages in
//! `[0, 100]`. After construction a set is never mutated.
//!
//! On the wire a chart is a nested map
//! `profile -> age band -> bp band -> [5 percentages]`, e.g.
//! `{"male_smoker": {"40-44": {"100-119": [6, 7, 9, 11, 11]}}}`.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::bands::{AgeBand, BpBand, NonHdlBand, Regime, RiskProfile, TableKey};
use super::region::RiskRegion;

/// Errors raised while building or querying a chart.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
    #[error("No chart data for {key} in {regime}")]
    MissingCell { regime: Regime, key: TableKey },

    #[error("Duplicate chart row for {0}")]
    DuplicateCell(TableKey),

    #[error("Age band of {key} does not belong to {regime}")]
    WrongRegime { regime: Regime, key: TableKey },

    #[error("Expected a {expected} chart, got {found}")]
    RegimeMismatch { expected: Regime, found: Regime },

    #[error("Risk value {value} for {key} is not a percentage")]
    InvalidValue { key: TableKey, value: f64 },

    #[error("Table set version must not be empty")]
    EmptyVersion,

    #[error("Table serialization failed: {0}")]
    Serialization(String),

    #[error("Table digest mismatch: expected {expected}, got {actual}")]
    DigestMismatch { expected: String, actual: String },
}

/// One chart row: risk percentages for the five non-HDL columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskRow([f64; 5]);

impl RiskRow {
    #[must_use]
    pub fn new(values: [f64; 5]) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn values(&self) -> &[f64; 5] {
        &self.0
    }

    /// Risk at a chart column.
    #[must_use]
    pub fn at(&self, band: NonHdlBand) -> f64 {
        self.0[band.index()]
    }
}

impl From<[u8; 5]> for RiskRow {
    fn from(values: [u8; 5]) -> Self {
        Self(values.map(f64::from))
    }
}

type NestedRows = BTreeMap<RiskProfile, BTreeMap<AgeBand, BTreeMap<BpBand, RiskRow>>>;

/// A complete chart for one age regime.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskTable {
    regime: Regime,
    rows: HashMap<TableKey, RiskRow>,
}

impl RiskTable {
    /// Build and validate a chart.
    ///
    /// # Errors
    /// Returns the first structural problem found.
    pub fn new(
        regime: Regime,
        rows: impl IntoIterator<Item = (TableKey, RiskRow)>,
    ) -> Result<Self, TableError> {
        let mut map = HashMap::new();
        for (key, row) in rows {
            if key.age_band.regime() != regime {
                return Err(TableError::WrongRegime { regime, key });
            }
            if let Some(&value) = row
                .values()
                .iter()
                .find(|v| !v.is_finite() || !(0.0..=100.0).contains(*v))
            {
                return Err(TableError::InvalidValue { key, value });
            }
            if map.insert(key, row).is_some() {
                return Err(TableError::DuplicateCell(key));
            }
        }

        let table = Self { regime, rows: map };
        for key in table.expected_keys() {
            if !table.rows.contains_key(&key) {
                return Err(TableError::MissingCell { regime, key });
            }
        }
        Ok(table)
    }

    fn expected_keys(&self) -> impl Iterator<Item = TableKey> + '_ {
        RiskProfile::ALL.into_iter().flat_map(move |profile| {
            self.regime.age_bands().iter().flat_map(move |&age_band| {
                BpBand::ALL
                    .into_iter()
                    .map(move |bp_band| TableKey::new(profile, age_band, bp_band))
            })
        })
    }

    #[must_use]
    pub fn regime(&self) -> Regime {
        self.regime
    }

    #[must_use]
    pub fn get(&self, key: &TableKey) -> Option<&RiskRow> {
        self.rows.get(key)
    }

    /// Like [`RiskTable::get`] but a miss is an error.
    ///
    /// # Errors
    /// Returns `TableError::MissingCell` when the chart has no such row.
    pub fn row(&self, key: &TableKey) -> Result<&RiskRow, TableError> {
        self.rows.get(key).ok_or(TableError::MissingCell {
            regime: self.regime,
            key: *key,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn to_nested(&self) -> NestedRows {
        let mut nested = NestedRows::new();
        for (key, row) in &self.rows {
            nested
                .entry(key.profile)
                .or_default()
                .entry(key.age_band)
                .or_default()
                .insert(key.bp_band, *row);
        }
        nested
    }

    fn from_nested(regime: Regime, nested: NestedRows) -> Result<Self, TableError> {
        let rows = nested.into_iter().flat_map(|(profile, ages)| {
            ages.into_iter().flat_map(move |(age_band, bps)| {
                bps.into_iter()
                    .map(move |(bp_band, row)| (TableKey::new(profile, age_band, bp_band), row))
            })
        });
        Self::new(regime, rows)
    }
}

/// Versioned pair of charts for one region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableSetRepr", into = "TableSetRepr")]
pub struct TableSet {
    version: String,
    region: RiskRegion,
    standard: RiskTable,
    elderly: RiskTable,
}

impl TableSet {
    /// # Errors
    /// Returns `TableError::EmptyVersion` for a blank version, or
    /// `TableError::RegimeMismatch` if the charts are swapped.
    pub fn new(
        version: impl Into<String>,
        region: RiskRegion,
        standard: RiskTable,
        elderly: RiskTable,
    ) -> Result<Self, TableError> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(TableError::EmptyVersion);
        }
        for (expected, table) in [(Regime::Standard, &standard), (Regime::Elderly, &elderly)] {
            if table.regime() != expected {
                return Err(TableError::RegimeMismatch {
                    expected,
                    found: table.regime(),
                });
            }
        }
        Ok(Self {
            version,
            region,
            standard,
            elderly,
        })
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn region(&self) -> RiskRegion {
        self.region
    }

    #[must_use]
    pub fn table(&self, regime: Regime) -> &RiskTable {
        match regime {
            Regime::Standard => &self.standard,
            Regime::Elderly => &self.elderly,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TableSetRepr {
    version: String,
    #[serde(default)]
    region: RiskRegion,
    standard: NestedRows,
    elderly: NestedRows,
}

impl TryFrom<TableSetRepr> for TableSet {
    type Error = TableError;

    fn try_from(repr: TableSetRepr) -> Result<Self, Self::Error> {
        let standard = RiskTable::from_nested(Regime::Standard, repr.standard)?;
        let elderly = RiskTable::from_nested(Regime::Elderly, repr.elderly)?;
        Self::new(repr.version, repr.region, standard, elderly)
    }
}

impl From<TableSet> for TableSetRepr {
    fn from(set: TableSet) -> Self {
        Self {
            standard: set.standard.to_nested(),
            elderly: set.elderly.to_nested(),
            version: set.version,
            region: set.region,
        }
    }
}
