//! Dual-mode quantity controller
//!
//! Coordinates the two mutually exclusive input modes (serving-based and
//! gram-based) over one logical quantity. The canonical gram amount is the
//! single source of truth; the nutrition preview and submission payload
//! are both derived from it on read.

use serde::Serialize;
use thiserror::Error;

use crate::models::{Food, MealType, Serving};

use super::calculator::{scale, ScaledNutrition};
use super::converter::reference_serving_display;
use super::Quantity;

/// Active input mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuantityMode {
    /// Quantity entered as "N servings of unit U"
    #[default]
    Serving,
    /// Quantity entered directly in grams
    Grams,
}

/// How the submitted quantity was entered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Serving,
    Grams,
}

/// Finalized payload handed to the submission sink
///
/// `grams` is the exact canonical amount; display rounding never leaks
/// into it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionPayload {
    pub food_id: i64,
    pub grams: f64,
    pub unit_type: UnitType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serving_id: Option<i64>,
}

/// The first unmet submission requirement
///
/// `InvalidQuantity` from the converter never escapes the controller; it
/// surfaces here as a not-ready reason instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotReady {
    #[error("no food selected")]
    NoFoodSelected,
    #[error("no serving selected")]
    NoServingSelected,
    #[error("quantity is missing or not a positive amount")]
    InvalidQuantity,
    #[error("no meal type selected")]
    NoMealType,
}

/// Session-scoped controller over one logical quantity
///
/// Each editing session (tab, dialog, test) owns its own instance; there
/// is no shared page-level state.
#[derive(Debug, Default)]
pub struct QuantityController {
    food: Option<Food>,
    servings: Vec<Serving>,
    mode: QuantityMode,
    serving_count: Option<f64>,
    selected_serving_id: Option<i64>,
    grams_input: Option<f64>,
    meal_type: Option<MealType>,
}

impl QuantityController {
    /// Create a controller with no food selected, starting in serving mode
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the food being logged
    pub fn set_food(&mut self, food: Food) {
        self.food = Some(food);
    }

    pub fn clear_food(&mut self) {
        self.food = None;
    }

    /// Replace the serving list snapshot read from the catalog
    ///
    /// Drops the serving selection if the selected id no longer exists.
    pub fn set_servings(&mut self, servings: Vec<Serving>) {
        self.servings = servings;
        if let Some(id) = self.selected_serving_id {
            if !self.servings.iter().any(|s| s.id == id) {
                self.selected_serving_id = None;
            }
        }
    }

    /// Set the serving-count input (serving mode)
    pub fn set_serving_count(&mut self, count: f64) {
        self.serving_count = Some(count);
    }

    /// Select a serving by id; unknown ids clear the selection
    pub fn select_serving(&mut self, serving_id: i64) {
        if self.servings.iter().any(|s| s.id == serving_id) {
            self.selected_serving_id = Some(serving_id);
        } else {
            self.selected_serving_id = None;
        }
    }

    /// Set the gram input (gram mode)
    pub fn set_grams(&mut self, grams: f64) {
        self.grams_input = Some(grams);
    }

    pub fn set_meal_type(&mut self, meal_type: MealType) {
        self.meal_type = Some(meal_type);
    }

    /// Current input mode; serving mode is the initial state
    pub fn mode(&self) -> QuantityMode {
        self.mode
    }

    /// Switch input modes, carrying the equivalent amount across
    ///
    /// Switching to gram mode populates the gram input from the current
    /// canonical grams (0 when unresolvable). Switching to serving mode
    /// derives a display count against the selected serving, falling back
    /// to the food's explicit default; with only the system default there
    /// is no serving record to select, so the selection stays empty and
    /// the count is left for the user. The fallback serving may not match
    /// the entered gram amount semantically; that ambiguity is inherited
    /// behavior and deliberately not auto-corrected.
    pub fn switch_mode(&mut self, mode: QuantityMode) {
        if self.mode == mode {
            return;
        }
        match mode {
            QuantityMode::Grams => {
                self.grams_input = Some(self.canonical_grams().unwrap_or(0.0));
            }
            QuantityMode::Serving => {
                let target = self
                    .selected_serving()
                    .or_else(|| self.default_serving())
                    .map(|s| (s.id, s.grams_per_unit));
                if let Some((id, grams_per_unit)) = target {
                    self.selected_serving_id = Some(id);
                    self.serving_count = self
                        .grams_input
                        .filter(|g| g.is_finite() && *g > 0.0)
                        .map(|g| g / grams_per_unit);
                }
            }
        }
        self.mode = mode;
    }

    /// The quantity in its active representation, when complete enough to
    /// resolve
    pub fn quantity(&self) -> Option<Quantity> {
        match self.mode() {
            QuantityMode::Serving => match (self.serving_count, self.selected_serving_id) {
                (Some(count), Some(serving_id)) => Some(Quantity::ByServing { count, serving_id }),
                _ => None,
            },
            QuantityMode::Grams => self.grams_input.map(|grams| Quantity::ByGrams { grams }),
        }
    }

    /// Canonical gram amount, when the active inputs resolve to one
    pub fn canonical_grams(&self) -> Option<f64> {
        self.quantity()
            .and_then(|q| q.to_grams(&self.servings).ok())
    }

    /// Nutrition preview for the current quantity
    ///
    /// `None` without a selected food; an empty `ScaledNutrition` when a
    /// food is selected but no resolvable quantity has been entered.
    pub fn preview(&self) -> Option<ScaledNutrition> {
        let food = self.food.as_ref()?;
        Some(scale(&food.per_100g, self.canonical_grams().unwrap_or(0.0)))
    }

    /// Advisory serving equivalent shown in gram mode
    ///
    /// Uses the first serving as the reference; informational text only.
    pub fn reference_display(&self) -> Option<String> {
        if self.mode() != QuantityMode::Grams {
            return None;
        }
        let grams = self.grams_input.filter(|g| g.is_finite() && *g > 0.0)?;
        let reference = self.servings.first()?;
        Some(reference_serving_display(grams, reference))
    }

    /// Build the submission payload, or report the first missing
    /// requirement
    ///
    /// Checked in order: food, serving selection (serving mode only),
    /// quantity, meal type.
    pub fn submission(&self) -> Result<SubmissionPayload, NotReady> {
        let food = self.food.as_ref().ok_or(NotReady::NoFoodSelected)?;

        let (grams, unit_type, serving_id) = match self.mode() {
            QuantityMode::Serving => {
                let serving = self
                    .selected_serving()
                    .ok_or(NotReady::NoServingSelected)?;
                let count = self
                    .serving_count
                    .filter(|c| c.is_finite() && *c > 0.0)
                    .ok_or(NotReady::InvalidQuantity)?;
                (
                    count * serving.grams_per_unit,
                    UnitType::Serving,
                    Some(serving.id),
                )
            }
            QuantityMode::Grams => {
                let grams = self
                    .grams_input
                    .filter(|g| g.is_finite() && *g > 0.0)
                    .ok_or(NotReady::InvalidQuantity)?;
                (grams, UnitType::Grams, None)
            }
        };

        if self.meal_type.is_none() {
            return Err(NotReady::NoMealType);
        }

        Ok(SubmissionPayload {
            food_id: food.id,
            grams,
            unit_type,
            serving_id,
        })
    }

    pub fn is_ready(&self) -> bool {
        self.submission().is_ok()
    }

    /// The currently selected serving, if any
    pub fn selected_serving(&self) -> Option<&Serving> {
        let id = self.selected_serving_id?;
        self.servings.iter().find(|s| s.id == id)
    }

    /// The food's explicitly marked default serving, if any
    fn default_serving(&self) -> Option<&Serving> {
        self.servings.iter().find(|s| s.is_default)
    }
}
