//! Serving field validation
//!
//! Pure functions with no UI or transport dependency. Results carry
//! structured per-field errors so any presentation layer can surface them.

use crate::error::{CatalogError, CatalogResult, FieldError, ServingField};
use crate::models::{ServingCreate, ServingPatch};

/// Minimum serving name length (characters, after trimming)
pub const NAME_MIN_LEN: usize = 2;
/// Maximum serving name length
pub const NAME_MAX_LEN: usize = 50;
/// Minimum unit length
pub const UNIT_MIN_LEN: usize = 1;
/// Maximum unit length
pub const UNIT_MAX_LEN: usize = 20;
/// Minimum grams represented by one unit of a serving
pub const GRAMS_PER_UNIT_MIN: f64 = 0.1;
/// Maximum grams represented by one unit of a serving
pub const GRAMS_PER_UNIT_MAX: f64 = 2000.0;

fn check_name(name: &str) -> Result<String, FieldError> {
    let trimmed = name.trim();
    let len = trimmed.chars().count();
    if len < NAME_MIN_LEN || len > NAME_MAX_LEN {
        return Err(FieldError::new(
            ServingField::Name,
            format!("must be {NAME_MIN_LEN}-{NAME_MAX_LEN} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

fn check_unit(unit: &str) -> Result<String, FieldError> {
    let trimmed = unit.trim();
    let len = trimmed.chars().count();
    if len < UNIT_MIN_LEN || len > UNIT_MAX_LEN {
        return Err(FieldError::new(
            ServingField::Unit,
            format!("must be {UNIT_MIN_LEN}-{UNIT_MAX_LEN} characters"),
        ));
    }
    Ok(trimmed.to_string())
}

fn check_grams_per_unit(grams: f64) -> Result<f64, FieldError> {
    if !grams.is_finite() || grams < GRAMS_PER_UNIT_MIN || grams > GRAMS_PER_UNIT_MAX {
        return Err(FieldError::new(
            ServingField::GramsPerUnit,
            format!("must be between {GRAMS_PER_UNIT_MIN} and {GRAMS_PER_UNIT_MAX} grams"),
        ));
    }
    Ok(grams)
}

/// Validate fields for a new serving
///
/// Collects every failing field rather than stopping at the first, so the
/// caller can surface all problems at once.
pub fn validate_create(name: &str, unit: &str, grams_per_unit: f64) -> CatalogResult<ServingCreate> {
    let mut errors = Vec::new();

    let name = check_name(name).map_err(|e| errors.push(e)).ok();
    let unit = check_unit(unit).map_err(|e| errors.push(e)).ok();
    let grams = check_grams_per_unit(grams_per_unit)
        .map_err(|e| errors.push(e))
        .ok();

    match (name, unit, grams) {
        (Some(name), Some(unit), Some(grams_per_unit)) => Ok(ServingCreate {
            name,
            unit,
            grams_per_unit,
        }),
        _ => Err(CatalogError::validation(errors)),
    }
}

/// Validate the touched fields of a patch, leaving untouched fields alone
///
/// Returns the patch with name/unit trimmed.
pub fn validate_patch(patch: ServingPatch) -> CatalogResult<ServingPatch> {
    let mut errors = Vec::new();
    let mut validated = ServingPatch::default();

    if let Some(name) = patch.name {
        match check_name(&name) {
            Ok(name) => validated.name = Some(name),
            Err(e) => errors.push(e),
        }
    }
    if let Some(unit) = patch.unit {
        match check_unit(&unit) {
            Ok(unit) => validated.unit = Some(unit),
            Err(e) => errors.push(e),
        }
    }
    if let Some(grams) = patch.grams_per_unit {
        match check_grams_per_unit(grams) {
            Ok(grams) => validated.grams_per_unit = Some(grams),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(validated)
    } else {
        Err(CatalogError::validation(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_create_trims_fields() {
        let data = validate_create("  1 bowl ", " bowl ", 240.0).unwrap();
        assert_eq!(data.name, "1 bowl");
        assert_eq!(data.unit, "bowl");
        assert_eq!(data.grams_per_unit, 240.0);
    }

    #[test]
    fn test_create_collects_all_field_errors() {
        let err = validate_create("x", "", 0.0).unwrap_err();
        let CatalogError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        let mut fields: Vec<_> = fields.iter().map(|e| e.field).collect();
        fields.sort_by_key(|f| f.as_str());
        assert_eq!(
            fields,
            vec![
                ServingField::GramsPerUnit,
                ServingField::Name,
                ServingField::Unit
            ]
        );
    }

    #[test]
    fn test_grams_per_unit_bounds_inclusive() {
        assert!(validate_create("1 pinch", "pinch", 0.1).is_ok());
        assert!(validate_create("1 batch", "batch", 2000.0).is_ok());
        assert!(validate_create("1 pinch", "pinch", 0.0999).is_err());
        assert!(validate_create("1 batch", "batch", 2000.1).is_err());
        assert!(validate_create("1 batch", "batch", f64::NAN).is_err());
    }

    #[test]
    fn test_name_length_bounds() {
        assert!(validate_create("ab", "g", 1.0).is_ok());
        assert!(validate_create(&"a".repeat(50), "g", 1.0).is_ok());
        assert!(validate_create(&"a".repeat(51), "g", 1.0).is_err());
    }

    #[test]
    fn test_unit_length_bounds() {
        assert!(validate_create("1 cup", "c", 1.0).is_ok());
        assert!(validate_create("1 cup", &"u".repeat(21), 1.0).is_err());
    }

    #[test]
    fn test_patch_only_checks_touched_fields() {
        let patch = ServingPatch {
            grams_per_unit: Some(250.0),
            ..Default::default()
        };
        let validated = validate_patch(patch).unwrap();
        assert_eq!(validated.grams_per_unit, Some(250.0));
        assert!(validated.name.is_none());

        let bad = ServingPatch {
            name: Some("x".to_string()),
            ..Default::default()
        };
        assert!(validate_patch(bad).is_err());
    }
}
