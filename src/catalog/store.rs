//! External collaborator traits
//!
//! The core owns no transport or schema; persistence and food lookup are
//! reached through these traits. Implementations map their own failure
//! modes onto the `CatalogError` taxonomy (timeouts and network errors
//! become `TransientFailure`).

use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::models::{Food, Serving, ServingCreate, ServingPatch};

/// A food's serving list as reported by the store
///
/// `is_default` flags are carried on the servings themselves; the catalog
/// session normalizes the list if more than one is flagged.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    pub servings: Vec<Serving>,
}

/// Persistence collaborator for serving records
///
/// Every mutation is confirm-before-apply: callers only update their view
/// after a method returns `Ok`. Implementations must not partially apply
/// a request.
#[async_trait]
pub trait ServingStore: Send + Sync {
    /// Load the current serving list for a food
    async fn load(&self, food_id: i64) -> CatalogResult<CatalogSnapshot>;

    /// Create a serving; returns the stored record with its assigned id
    async fn create(&self, food_id: i64, data: &ServingCreate) -> CatalogResult<Serving>;

    /// Update a serving's fields; returns the stored record
    async fn update(
        &self,
        food_id: i64,
        serving_id: i64,
        patch: &ServingPatch,
    ) -> CatalogResult<Serving>;

    /// Delete a serving; fails with `ReferencedByLog` if meal logs
    /// reference it
    async fn delete(&self, food_id: i64, serving_id: i64) -> CatalogResult<()>;

    /// Mark a serving as the food's only default
    async fn set_default(&self, food_id: i64, serving_id: i64) -> CatalogResult<()>;

    /// Clear a serving's default marker
    async fn unset_default(&self, food_id: i64, serving_id: i64) -> CatalogResult<()>;
}

/// Read-only provider of food records and their per-100g baselines
#[async_trait]
pub trait FoodProvider: Send + Sync {
    async fn fetch(&self, food_id: i64) -> CatalogResult<Food>;
}
