//! Shared nutrition data structure
//!
//! Used both as a food's per-100g baseline and as scaled output values.

use serde::{Deserialize, Serialize};

/// Macro-nutrient values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64, // grams
    pub carbs: f64,   // grams
    pub fat: f64,     // grams
    pub fiber: f64,   // grams
}

impl Nutrition {
    /// Create a new Nutrition with all zeros
    pub fn zero() -> Self {
        Self::default()
    }

    /// Scale nutrition values by a multiplier
    pub fn scale(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein: self.protein * multiplier,
            carbs: self.carbs * multiplier,
            fat: self.fat * multiplier,
            fiber: self.fiber * multiplier,
        }
    }

    /// Add another nutrition to this one
    pub fn add(&self, other: &Nutrition) -> Self {
        Self {
            calories: self.calories + other.calories,
            protein: self.protein + other.protein,
            carbs: self.carbs + other.carbs,
            fat: self.fat + other.fat,
            fiber: self.fiber + other.fiber,
        }
    }
}

impl std::ops::Add for Nutrition {
    type Output = Nutrition;

    fn add(self, other: Nutrition) -> Nutrition {
        Nutrition::add(&self, &other)
    }
}

impl std::ops::Mul<f64> for Nutrition {
    type Output = Nutrition;

    fn mul(self, multiplier: f64) -> Nutrition {
        self.scale(multiplier)
    }
}

impl std::iter::Sum for Nutrition {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Nutrition::zero(), |acc, n| acc + n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> Nutrition {
        Nutrition {
            calories: 389.0,
            protein: 16.9,
            carbs: 66.3,
            fat: 6.9,
            fiber: 10.6,
        }
    }

    #[test]
    fn test_scale() {
        let scaled = baseline().scale(0.5);
        assert!((scaled.calories - 194.5).abs() < 1e-9);
        assert!((scaled.protein - 8.45).abs() < 1e-9);
    }

    #[test]
    fn test_add_and_sum() {
        let total: Nutrition = vec![baseline(), baseline()].into_iter().sum();
        assert!((total.calories - 778.0).abs() < 1e-9);
        assert!((total.fiber - 21.2).abs() < 1e-9);
    }

    #[test]
    fn test_zero_is_all_zero() {
        let z = Nutrition::zero();
        assert_eq!(z, Nutrition::default());
        assert_eq!(z.calories, 0.0);
    }
}
