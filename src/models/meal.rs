//! Meal type classification
//!
//! The controller only checks that a classification has been selected;
//! any further meal-type semantics belong to the submission sink.

use serde::{Deserialize, Serialize};

/// Meal type enum
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "breakfast" => Some(MealType::Breakfast),
            "lunch" => Some(MealType::Lunch),
            "dinner" => Some(MealType::Dinner),
            "snack" => Some(MealType::Snack),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_strings() {
        for s in ["breakfast", "lunch", "dinner", "snack"] {
            let parsed = MealType::from_str(s).unwrap();
            assert_eq!(parsed.as_str(), s);
        }
        assert_eq!(MealType::from_str("brunch"), None);
    }
}
