//! Nutrition scaling
//!
//! Scales a food's per-100g baseline by a gram amount. Exact values are
//! kept for anything submitted upstream; rounding only applies to the
//! display accessors.

use serde::Serialize;

use crate::models::Nutrition;

/// Nutrition values scaled to a gram amount
///
/// `values` holds the exact reals; the `_display` accessors apply the
/// presentation rounding policy (whole calories, one decimal for macro
/// grams). An empty result means no preview should be shown at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaledNutrition {
    values: Nutrition,
    empty: bool,
}

impl ScaledNutrition {
    /// Exact scaled values, no rounding applied
    pub fn values(&self) -> &Nutrition {
        &self.values
    }

    /// True when the quantity was zero or unresolvable; callers should
    /// show no preview rather than an all-zero one
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    /// Calories rounded to the nearest whole number
    pub fn calories_display(&self) -> i64 {
        self.values.calories.round() as i64
    }

    pub fn protein_display(&self) -> f64 {
        round1(self.values.protein)
    }

    pub fn carbs_display(&self) -> f64 {
        round1(self.values.carbs)
    }

    pub fn fat_display(&self) -> f64 {
        round1(self.values.fat)
    }

    pub fn fiber_display(&self) -> f64 {
        round1(self.values.fiber)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Scale a per-100g baseline to a gram amount
///
/// A zero, negative or non-finite gram amount yields all-zero values
/// flagged empty; this is the "nothing entered yet" state, not an error.
pub fn scale(baseline: &Nutrition, grams: f64) -> ScaledNutrition {
    if !grams.is_finite() || grams <= 0.0 {
        return ScaledNutrition {
            values: Nutrition::zero(),
            empty: true,
        };
    }
    ScaledNutrition {
        values: baseline.scale(grams / 100.0),
        empty: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oatmeal() -> Nutrition {
        Nutrition {
            calories: 389.0,
            protein: 16.9,
            carbs: 66.3,
            fat: 6.9,
            fiber: 10.6,
        }
    }

    #[test]
    fn test_scale_oatmeal_bowl_and_a_half() {
        // 1.5 bowls of 240g each = 360g
        let scaled = scale(&oatmeal(), 360.0);
        assert!(!scaled.is_empty());
        assert_eq!(scaled.calories_display(), 1400); // 389 * 3.6 = 1400.4
        assert_eq!(scaled.protein_display(), 60.8); // 16.9 * 3.6 = 60.84
    }

    #[test]
    fn test_exact_values_are_not_rounded() {
        let scaled = scale(&oatmeal(), 360.0);
        assert!((scaled.values().calories - 1400.4).abs() < 1e-9);
        assert!((scaled.values().protein - 60.84).abs() < 1e-9);
    }

    #[test]
    fn test_zero_grams_is_empty_and_all_zero() {
        let scaled = scale(&oatmeal(), 0.0);
        assert!(scaled.is_empty());
        assert_eq!(scaled.values(), &Nutrition::zero());
        assert_eq!(scaled.calories_display(), 0);
    }

    #[test]
    fn test_negative_and_nan_grams_are_empty() {
        assert!(scale(&oatmeal(), -10.0).is_empty());
        assert!(scale(&oatmeal(), f64::NAN).is_empty());
    }

    #[test]
    fn test_calories_round_half_up() {
        let baseline = Nutrition {
            calories: 389.0,
            ..Nutrition::zero()
        };
        assert_eq!(scale(&baseline, 100.0).calories_display(), 389);
        assert_eq!(scale(&baseline, 50.0).calories_display(), 195); // 194.5
    }
}
