//! LDL-only fallback estimator.
//!
//! Used when total and HDL cholesterol are unavailable but LDL is. A
//! multiplicative approximation: base rate by sex and age, times smoking,
//! blood pressure and LDL coefficients, times the regional and diabetes
//! multipliers, clamped to `[0, 100]`. Coarser than the chart method and never
//! preferred over it.

use super::bands::Regime;
use super::patient::{CardioInputs, Sex};
use super::region::RiskRegion;

fn base_rate(regime: Regime, sex: Sex, age: u32) -> f64 {
    match (regime, sex) {
        (Regime::Standard, Sex::Male) => match age {
            0..=49 => 1.5,
            50..=59 => 4.0,
            _ => 9.0,
        },
        (Regime::Standard, Sex::Female) => match age {
            0..=49 => 0.8,
            50..=59 => 2.5,
            _ => 6.0,
        },
        (Regime::Elderly, Sex::Male) => match age {
            0..=74 => 12.0,
            75..=79 => 16.0,
            _ => 21.0,
        },
        (Regime::Elderly, Sex::Female) => match age {
            0..=74 => 9.0,
            75..=79 => 12.0,
            _ => 15.0,
        },
    }
}

fn smoking_coefficient(regime: Regime, smoker: bool) -> f64 {
    match (regime, smoker) {
        (_, false) => 1.0,
        (Regime::Standard, true) => 1.8,
        (Regime::Elderly, true) => 1.5,
    }
}

fn bp_coefficient(regime: Regime, systolic_bp: u32) -> f64 {
    match regime {
        Regime::Standard => match systolic_bp {
            0..=119 => 0.8,
            120..=139 => 1.0,
            140..=159 => 1.3,
            160..=179 => 1.6,
            _ => 1.9,
        },
        Regime::Elderly => match systolic_bp {
            0..=139 => 0.9,
            140..=159 => 1.0,
            160..=179 => 1.2,
            _ => 1.4,
        },
    }
}

fn ldl_coefficient(regime: Regime, ldl: f64) -> f64 {
    let bands: &[(f64, f64)] = match regime {
        Regime::Standard => &[(1.8, 0.8), (2.6, 1.0), (3.0, 1.2), (4.1, 1.4), (4.9, 1.6)],
        Regime::Elderly => &[(2.6, 0.9), (3.4, 1.0), (4.1, 1.1), (4.9, 1.2)],
    };
    let top = match regime {
        Regime::Standard => 1.8,
        Regime::Elderly => 1.3,
    };
    bands
        .iter()
        .find(|(upper, _)| ldl < *upper)
        .map_or(top, |&(_, coefficient)| coefficient)
}

fn diabetes_multiplier(regime: Regime, diabetic: bool) -> f64 {
    match (regime, diabetic) {
        (_, false) => 1.0,
        (Regime::Standard, true) => 1.5,
        (Regime::Elderly, true) => 1.3,
    }
}

/// Approximate risk (percent) from LDL cholesterol.
///
/// `ldl` must be positive; callers establish that before calling.
#[must_use]
pub fn simplified_risk(inputs: &CardioInputs, ldl: f64, region: RiskRegion) -> f64 {
    let age = inputs.lookup_age();
    let regime = Regime::for_age(age);

    let risk = base_rate(regime, inputs.sex, age)
        * smoking_coefficient(regime, inputs.smoker)
        * bp_coefficient(regime, inputs.systolic_bp)
        * ldl_coefficient(regime, ldl)
        * region.simplified_multiplier(regime)
        * diabetes_multiplier(regime, inputs.diabetic);

    risk.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_standard_reference_value() {
        // 1.5 base * 1.0 bp * 1.2 ldl * 1.3 region
        let inputs = CardioInputs::new(45, Sex::Male, 130).with_ldl(2.8);
        assert!(close(simplified_risk(&inputs, 2.8, RiskRegion::VeryHigh), 2.34));
    }

    #[test]
    fn test_standard_all_multipliers() {
        // 4.0 base * 1.8 smoker * 1.9 bp * 1.8 ldl * 1.3 region * 1.5 diabetes
        let inputs = CardioInputs::new(55, Sex::Male, 190)
            .with_ldl(5.2)
            .with_smoker(true)
            .with_diabetes(true);
        let expected = 4.0 * 1.8 * 1.9 * 1.8 * 1.3 * 1.5;
        assert!(close(simplified_risk(&inputs, 5.2, RiskRegion::VeryHigh), expected));
    }

    #[test]
    fn test_product_clamped_to_hundred() {
        // 9.0 * 1.8 * 1.9 * 1.8 * 1.3 * 1.5 is about 108
        let inputs = CardioInputs::new(65, Sex::Male, 190)
            .with_ldl(5.2)
            .with_smoker(true)
            .with_diabetes(true);
        assert!(close(simplified_risk(&inputs, 5.2, RiskRegion::VeryHigh), 100.0));
    }

    #[test]
    fn test_elderly_reference_value() {
        // 12.0 base * 1.5 smoker * 1.2 bp * 1.0 ldl * 1.2 region * 1.3 diabetes
        let inputs = CardioInputs::new(77, Sex::Female, 165)
            .with_smoker(true)
            .with_diabetes(true);
        let expected = 12.0 * 1.5 * 1.2 * 1.0 * 1.2 * 1.3;
        assert!(close(simplified_risk(&inputs, 3.0, RiskRegion::VeryHigh), expected));
    }

    #[test]
    fn test_young_patients_use_forty_year_rates() {
        let young = CardioInputs::new(30, Sex::Female, 110);
        let forty = CardioInputs::new(40, Sex::Female, 110);
        assert!(close(
            simplified_risk(&young, 1.5, RiskRegion::VeryHigh),
            simplified_risk(&forty, 1.5, RiskRegion::VeryHigh)
        ));
    }

    #[test]
    fn test_ldl_band_edges() {
        assert!(close(ldl_coefficient(Regime::Standard, 1.79), 0.8));
        assert!(close(ldl_coefficient(Regime::Standard, 1.8), 1.0));
        assert!(close(ldl_coefficient(Regime::Standard, 4.9), 1.8));
        assert!(close(ldl_coefficient(Regime::Elderly, 3.4), 1.1));
        assert!(close(ldl_coefficient(Regime::Elderly, 6.0), 1.3));
    }

    #[test]
    fn test_result_is_clamped() {
        let inputs = CardioInputs::new(95, Sex::Male, 220)
            .with_smoker(true)
            .with_diabetes(true);
        let risk = simplified_risk(&inputs, 8.0, RiskRegion::VeryHigh);
        assert!(risk <= 100.0);
        assert!(risk >= 0.0);
    }
}
