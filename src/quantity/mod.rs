//! Quantity resolution and nutrition scaling
//!
//! Converts user-entered quantities (serving counts or raw grams) into a
//! canonical gram amount and scales a food's per-100g baseline from it.

pub mod calculator;
pub mod controller;
pub mod converter;

pub use calculator::{scale, ScaledNutrition};
pub use controller::{NotReady, QuantityController, QuantityMode, SubmissionPayload, UnitType};
pub use converter::{grams_to_serving_count, reference_serving_display, serving_to_grams};

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};
use crate::models::Serving;

/// One logical quantity in whichever input representation is active
///
/// The canonical value is always the gram amount produced by `to_grams`;
/// the two variants exist because serving selection is a first-class user
/// choice that cannot be re-derived from a gram value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Quantity {
    /// N units of a named serving
    ByServing { count: f64, serving_id: i64 },
    /// A raw gram amount
    ByGrams { grams: f64 },
}

impl Quantity {
    /// Resolve the canonical gram amount against a serving list
    pub fn to_grams(&self, servings: &[Serving]) -> CatalogResult<f64> {
        match *self {
            Quantity::ByServing { count, serving_id } => {
                let serving = servings.iter().find(|s| s.id == serving_id);
                converter::serving_to_grams(count, serving)
            }
            Quantity::ByGrams { grams } => {
                if grams.is_finite() && grams > 0.0 {
                    Ok(grams)
                } else {
                    Err(CatalogError::InvalidQuantity)
                }
            }
        }
    }
}
