//! Error types
//!
//! Shared error taxonomy for catalog mutations and quantity resolution.

use serde::Serialize;
use thiserror::Error;

/// Serving field targeted by a validation failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ServingField {
    Name,
    Unit,
    GramsPerUnit,
}

impl ServingField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServingField::Name => "name",
            ServingField::Unit => "unit",
            ServingField::GramsPerUnit => "grams_per_unit",
        }
    }
}

/// A single field-level validation failure
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub field: ServingField,
    pub message: String,
}

impl FieldError {
    pub fn new(field: ServingField, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field.as_str(), self.message)
    }
}

/// Catalog and quantity error types
///
/// No variant ever corresponds to a partially applied mutation: an
/// operation either fully succeeds or leaves prior state untouched.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// One or more serving fields are out of range
    #[error("serving validation failed")]
    Validation(Vec<FieldError>),

    /// Another serving of the same food already uses this (name, unit)
    /// combination (compared case-insensitively)
    #[error("a serving named '{name}' with unit '{unit}' already exists for this food")]
    DuplicateServing { name: String, unit: String },

    /// The serving is referenced by logged meals and cannot be deleted
    #[error("serving is referenced by meal logs and cannot be deleted")]
    ReferencedByLog,

    /// The targeted serving no longer exists (e.g. removed by another
    /// session); callers should refresh their catalog view
    #[error("serving not found")]
    NotFound,

    /// Zero, negative or otherwise unresolvable quantity
    #[error("quantity must be a positive, finite amount")]
    InvalidQuantity,

    /// Collaborator timeout or network error; the operation may be
    /// retried and the catalog state is unchanged
    #[error("persistence request failed: {0}")]
    TransientFailure(String),
}

impl CatalogError {
    /// Build a validation error from collected field errors
    pub fn validation(errors: Vec<FieldError>) -> Self {
        CatalogError::Validation(errors)
    }
}

/// Result type for catalog and quantity operations
pub type CatalogResult<T> = Result<T, CatalogError>;
