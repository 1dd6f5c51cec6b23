//! Serving/gram conversion functions
//!
//! Pure functions with no side effects. Gram amounts produced here are
//! the authoritative values; serving counts derived from grams are for
//! display only.

use crate::error::{CatalogError, CatalogResult};
use crate::models::Serving;

/// Convert a serving count to grams
///
/// Fails with `InvalidQuantity` when the count is zero, negative or not
/// finite, or when no serving is selected.
pub fn serving_to_grams(count: f64, serving: Option<&Serving>) -> CatalogResult<f64> {
    let serving = serving.ok_or(CatalogError::InvalidQuantity)?;
    if !count.is_finite() || count <= 0.0 {
        return Err(CatalogError::InvalidQuantity);
    }
    Ok(count * serving.grams_per_unit)
}

/// Derive the serving count equivalent to a gram amount
///
/// Display-only inverse of `serving_to_grams`; never used to convert back
/// into an authoritative serving-mode quantity, since serving selection is
/// a user choice, not something re-derived from grams.
pub fn grams_to_serving_count(grams: f64, serving: &Serving) -> f64 {
    grams / serving.grams_per_unit
}

/// Advisory equivalent of a gram amount in units of a reference serving
///
/// Shown while in gram mode, typically against the food's first serving.
/// The text is informational; it never feeds back into submitted data.
pub fn reference_serving_display(grams: f64, reference: &Serving) -> String {
    let count = grams_to_serving_count(grams, reference);
    format!("≈ {:.1} × {}", count, reference.name)
}
