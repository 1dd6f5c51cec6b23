//! Serving model
//!
//! A named, food-specific unit (e.g. "1 cup") with a fixed
//! gram-equivalence factor. Each serving belongs to exactly one food and
//! at most one serving per food carries the default marker.

use serde::{Deserialize, Serialize};

/// Grams represented by the implicit system default when no serving is
/// explicitly marked default
pub const SYSTEM_DEFAULT_GRAMS: f64 = 100.0;

/// A serving unit for a food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Serving {
    pub id: i64,
    pub food_id: i64,
    pub name: String,
    pub unit: String,
    pub grams_per_unit: f64,
    pub is_default: bool,
    pub created_at: String,
}

impl Serving {
    /// Case-insensitive match on the (name, unit) uniqueness key
    pub fn matches_name_unit(&self, name: &str, unit: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim()) && self.unit.eq_ignore_ascii_case(unit.trim())
    }
}

/// Data for creating a new serving
///
/// Produced by `catalog::validate`; field ranges are already checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServingCreate {
    pub name: String,
    pub unit: String,
    pub grams_per_unit: f64,
}

/// Data for updating a serving; `None` fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServingPatch {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub grams_per_unit: Option<f64>,
}

impl ServingPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.unit.is_none() && self.grams_per_unit.is_none()
    }

    /// Apply this patch to a serving in place
    pub fn apply_to(&self, serving: &mut Serving) {
        if let Some(name) = &self.name {
            serving.name = name.clone();
        }
        if let Some(unit) = &self.unit {
            serving.unit = unit.clone();
        }
        if let Some(grams) = self.grams_per_unit {
            serving.grams_per_unit = grams;
        }
    }
}

/// The resolved default serving for a food
///
/// Foods without an explicitly marked serving fall back to the implicit
/// 100 g system default, which is never stored as a serving record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultServing {
    /// A stored serving carries the default marker
    Explicit(i64),
    /// No explicit default; the 100 g system default applies
    System,
}

impl DefaultServing {
    pub fn is_system(&self) -> bool {
        matches!(self, DefaultServing::System)
    }

    /// The serving id, when an explicit default is set
    pub fn serving_id(&self) -> Option<i64> {
        match self {
            DefaultServing::Explicit(id) => Some(*id),
            DefaultServing::System => None,
        }
    }
}
