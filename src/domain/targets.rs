//! LDL targets and required reductions.

use super::category::RiskCategory;

/// Offset between non-HDL and LDL cholesterol (mmol/L) used to estimate LDL
/// when it was not measured.
pub const NON_HDL_TO_LDL_OFFSET: f64 = 0.8;

/// Target LDL cholesterol (mmol/L) for a risk category.
#[must_use]
pub fn target_ldl(category: RiskCategory) -> f64 {
    match category {
        RiskCategory::VeryHigh => 1.4,
        RiskCategory::High => 1.8,
        RiskCategory::Moderate => 2.6,
        RiskCategory::Low | RiskCategory::VeryLow => 3.0,
    }
}

/// Percentage reduction needed to bring `current` LDL down to `target`.
///
/// Zero when already at target or when either value is not positive.
#[must_use]
pub fn ldl_reduction(current: f64, target: f64) -> u32 {
    if current <= target || current <= 0.0 || target <= 0.0 {
        return 0;
    }
    let percent = (100.0 * (current - target) / current).round().max(0.0);
    // current > target > 0 bounds the percentage to [0, 100).
    percent as u32
}

/// Estimated LDL from non-HDL cholesterol, never negative.
#[must_use]
pub fn estimate_ldl_from_non_hdl(non_hdl: f64) -> f64 {
    (non_hdl - NON_HDL_TO_LDL_OFFSET).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets() {
        assert_eq!(target_ldl(RiskCategory::VeryHigh), 1.4);
        assert_eq!(target_ldl(RiskCategory::High), 1.8);
        assert_eq!(target_ldl(RiskCategory::Moderate), 2.6);
        assert_eq!(target_ldl(RiskCategory::Low), 3.0);
        assert_eq!(target_ldl(RiskCategory::VeryLow), 3.0);
    }

    #[test]
    fn test_reduction_reference_value() {
        assert_eq!(ldl_reduction(3.0, 1.4), 53);
    }

    #[test]
    fn test_no_reduction_at_or_below_target() {
        assert_eq!(ldl_reduction(1.4, 1.4), 0);
        assert_eq!(ldl_reduction(1.0, 1.8), 0);
    }

    #[test]
    fn test_non_positive_inputs() {
        assert_eq!(ldl_reduction(0.0, 1.4), 0);
        assert_eq!(ldl_reduction(4.0, 0.0), 0);
        assert_eq!(ldl_reduction(-2.0, -3.0), 0);
    }

    #[test]
    fn test_estimate_from_non_hdl() {
        assert!((estimate_ldl_from_non_hdl(4.3) - 3.5).abs() < 1e-9);
        assert_eq!(estimate_ldl_from_non_hdl(0.5), 0.0);
    }
}
