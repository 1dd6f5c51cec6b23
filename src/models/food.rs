//! Food model
//!
//! A food with its per-100g macro baseline. Owned by the external food
//! provider; the core treats it as read-only input.

use serde::{Deserialize, Serialize};

use super::Nutrition;

/// A food item with per-100g nutritional information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: i64,
    pub name: String,
    pub brand: Option<String>,
    /// Macro baseline per 100 grams of this food
    pub per_100g: Nutrition,
}

impl Food {
    pub fn new(id: i64, name: impl Into<String>, per_100g: Nutrition) -> Self {
        Self {
            id,
            name: name.into(),
            brand: None,
            per_100g,
        }
    }
}
