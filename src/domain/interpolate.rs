//! Linear interpolation along the non-HDL cholesterol axis of a chart row.

use super::bands::{AgeBand, BpBand, Regime, RiskProfile, TableKey, NON_HDL_BOUNDARIES};
use super::tables::{RiskRow, TableError, TableSet};

/// Where a non-HDL value falls on the chart axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CholesterolPosition {
    /// Column the value starts from
    pub index: usize,
    /// Fraction of the way to the next column, in `[0, 1)`
    pub weight: f64,
}

/// Locate `non_hdl` among the column boundaries.
///
/// Values at or below the first boundary pin to the first column, values at or
/// above the last boundary pin to the last column; both carry zero weight.
#[must_use]
pub fn cholesterol_position(non_hdl: f64) -> CholesterolPosition {
    let last = NON_HDL_BOUNDARIES.len() - 1;
    if non_hdl <= NON_HDL_BOUNDARIES[0] {
        return CholesterolPosition {
            index: 0,
            weight: 0.0,
        };
    }
    if non_hdl >= NON_HDL_BOUNDARIES[last] {
        return CholesterolPosition {
            index: last,
            weight: 0.0,
        };
    }

    // Only NaN matches no interval; it falls back to the last column.
    NON_HDL_BOUNDARIES
        .windows(2)
        .position(|w| non_hdl >= w[0] && non_hdl < w[1])
        .map_or(
            CholesterolPosition {
                index: last,
                weight: 0.0,
            },
            |index| CholesterolPosition {
                index,
                weight: (non_hdl - NON_HDL_BOUNDARIES[index])
                    / (NON_HDL_BOUNDARIES[index + 1] - NON_HDL_BOUNDARIES[index]),
            },
        )
}

/// Risk for `non_hdl` read off one chart row.
#[must_use]
pub fn interpolate_row(row: &RiskRow, non_hdl: f64) -> f64 {
    let values = row.values();
    let CholesterolPosition { index, weight } = cholesterol_position(non_hdl);
    if weight == 0.0 || index >= values.len() - 1 {
        return values[index.min(values.len() - 1)];
    }
    values[index] + (values[index + 1] - values[index]) * weight
}

/// Chart row address for a patient.
#[must_use]
pub fn table_key(profile: RiskProfile, age: u32, systolic_bp: u32) -> (Regime, TableKey) {
    let regime = Regime::for_age(age);
    let key = TableKey::new(
        profile,
        AgeBand::for_age(age, regime),
        BpBand::for_systolic(systolic_bp),
    );
    (regime, key)
}

/// Official chart risk (percent) for the given patient coordinates.
///
/// `non_hdl` must be positive; callers establish that before calling.
///
/// # Errors
/// Returns `TableError::MissingCell` if the chart set has no row for the key.
pub fn interpolate_risk(
    tables: &TableSet,
    profile: RiskProfile,
    age: u32,
    systolic_bp: u32,
    non_hdl: f64,
) -> Result<f64, TableError> {
    let (regime, key) = table_key(profile, age, systolic_bp);
    let row = tables.table(regime).row(&key)?;
    Ok(interpolate_row(row, non_hdl))
}
