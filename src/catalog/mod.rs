//! Serving catalog
//!
//! Session-scoped management of one food's serving list. Mutations are
//! fire-and-confirm: the in-memory view changes only after the persistence
//! collaborator reports success, so a failed or timed-out request leaves
//! the prior state fully intact.

pub mod memory;
pub mod store;
pub mod validate;

pub use store::{CatalogSnapshot, FoodProvider, ServingStore};

use crate::error::{CatalogError, CatalogResult};
use crate::models::{DefaultServing, Serving, ServingPatch};

/// One editing session over a single food's serving catalog
///
/// Holds the confirmed serving list and default marker. Not a shared
/// singleton: each editing session (tab, test) owns its own instance.
pub struct CatalogSession<S: ServingStore> {
    store: S,
    food_id: i64,
    servings: Vec<Serving>,
}

impl<S: ServingStore> CatalogSession<S> {
    /// Open a session by loading the food's servings from the store
    pub async fn open(store: S, food_id: i64) -> CatalogResult<Self> {
        let snapshot = store.load(food_id).await?;
        let mut session = Self {
            store,
            food_id,
            servings: Vec::new(),
        };
        session.apply_snapshot(snapshot);
        Ok(session)
    }

    /// Reload the serving list from the store, discarding the local view
    ///
    /// Callers should refresh after a `NotFound` error, which signals the
    /// catalog was changed by another session.
    pub async fn refresh(&mut self) -> CatalogResult<()> {
        let snapshot = self.store.load(self.food_id).await?;
        self.apply_snapshot(snapshot);
        Ok(())
    }

    /// Replace the local view with a store snapshot, normalizing the
    /// single-default invariant
    ///
    /// Storage must never report more than one default serving; if it
    /// does, the first encountered wins and the rest are treated as
    /// non-default. The inconsistency is logged, not silently ignored.
    fn apply_snapshot(&mut self, snapshot: CatalogSnapshot) {
        let mut servings = snapshot.servings;
        let mut seen_default: Option<i64> = None;
        for serving in &mut servings {
            if serving.is_default {
                match seen_default {
                    None => seen_default = Some(serving.id),
                    Some(first) => {
                        tracing::warn!(
                            food_id = self.food_id,
                            kept = first,
                            demoted = serving.id,
                            "data integrity: multiple default servings reported by store"
                        );
                        serving.is_default = false;
                    }
                }
            }
        }
        self.servings = servings;
    }

    /// Add a new serving to the food
    ///
    /// Validates fields and rejects (name, unit) duplicates before asking
    /// the store; the created serving is appended only once confirmed. New
    /// servings are never created with the default marker.
    pub async fn add(&mut self, name: &str, unit: &str, grams_per_unit: f64) -> CatalogResult<&Serving> {
        let data = validate::validate_create(name, unit, grams_per_unit)?;
        if let Some(existing) = self
            .servings
            .iter()
            .find(|s| s.matches_name_unit(&data.name, &data.unit))
        {
            return Err(CatalogError::DuplicateServing {
                name: existing.name.clone(),
                unit: existing.unit.clone(),
            });
        }

        let created = self.store.create(self.food_id, &data).await?;
        self.servings.push(created);
        let idx = self.servings.len() - 1;
        Ok(&self.servings[idx])
    }

    /// Edit a serving's name, unit or gram factor
    ///
    /// The duplicate check excludes the serving being edited.
    pub async fn edit(&mut self, serving_id: i64, patch: ServingPatch) -> CatalogResult<&Serving> {
        let current = self
            .servings
            .iter()
            .find(|s| s.id == serving_id)
            .ok_or(CatalogError::NotFound)?;

        let patch = validate::validate_patch(patch)?;

        let candidate_name = patch.name.as_deref().unwrap_or(&current.name);
        let candidate_unit = patch.unit.as_deref().unwrap_or(&current.unit);
        if let Some(existing) = self
            .servings
            .iter()
            .filter(|s| s.id != serving_id)
            .find(|s| s.matches_name_unit(candidate_name, candidate_unit))
        {
            return Err(CatalogError::DuplicateServing {
                name: existing.name.clone(),
                unit: existing.unit.clone(),
            });
        }

        let updated = self.store.update(self.food_id, serving_id, &patch).await?;
        let slot = self
            .servings
            .iter_mut()
            .find(|s| s.id == serving_id)
            .ok_or(CatalogError::NotFound)?;
        *slot = updated;
        Ok(slot)
    }

    /// Remove a serving
    ///
    /// Servings referenced by meal logs cannot be removed; the store's
    /// `ReferencedByLog` conflict is surfaced unchanged and the list stays
    /// as it was. Removing the current default reverts the food to the
    /// implicit 100 g system default.
    pub async fn remove(&mut self, serving_id: i64) -> CatalogResult<()> {
        if !self.servings.iter().any(|s| s.id == serving_id) {
            return Err(CatalogError::NotFound);
        }
        self.store.delete(self.food_id, serving_id).await?;
        self.servings.retain(|s| s.id != serving_id);
        Ok(())
    }

    /// Mark a serving as the food's default, clearing any previous marker
    ///
    /// Atomic from the caller's perspective: the local view never holds
    /// two defaults, and a store failure leaves the prior marker in place.
    pub async fn set_default(&mut self, serving_id: i64) -> CatalogResult<()> {
        if !self.servings.iter().any(|s| s.id == serving_id) {
            return Err(CatalogError::NotFound);
        }
        self.store.set_default(self.food_id, serving_id).await?;
        for serving in &mut self.servings {
            serving.is_default = serving.id == serving_id;
        }
        Ok(())
    }

    /// Clear the default marker from a serving
    ///
    /// The food falls back to the 100 g system default.
    pub async fn unset_default(&mut self, serving_id: i64) -> CatalogResult<()> {
        let is_default = self
            .servings
            .iter()
            .find(|s| s.id == serving_id)
            .map(|s| s.is_default)
            .ok_or(CatalogError::NotFound)?;
        if !is_default {
            return Ok(());
        }
        self.store.unset_default(self.food_id, serving_id).await?;
        for serving in &mut self.servings {
            if serving.id == serving_id {
                serving.is_default = false;
            }
        }
        Ok(())
    }

    /// Resolve the food's active default
    pub fn resolve_default(&self) -> DefaultServing {
        match self.servings.iter().find(|s| s.is_default) {
            Some(serving) => DefaultServing::Explicit(serving.id),
            None => DefaultServing::System,
        }
    }

    /// The food this session edits
    pub fn food_id(&self) -> i64 {
        self.food_id
    }

    /// Current confirmed serving list
    pub fn servings(&self) -> &[Serving] {
        &self.servings
    }

    /// Look up a serving by id
    pub fn get(&self, serving_id: i64) -> Option<&Serving> {
        self.servings.iter().find(|s| s.id == serving_id)
    }

    pub fn len(&self) -> usize {
        self.servings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryServingStore;
    use super::*;
    use crate::models::SYSTEM_DEFAULT_GRAMS;

    async fn session_with(servings: &[(&str, &str, f64)]) -> CatalogSession<MemoryServingStore> {
        let store = MemoryServingStore::new();
        for (name, unit, grams) in servings {
            store.seed_serving(7, name, unit, *grams);
        }
        CatalogSession::open(store, 7).await.unwrap()
    }

    #[tokio::test]
    async fn test_add_appends_confirmed_serving() {
        let mut session = session_with(&[]).await;
        let created = session.add("1 bowl", "bowl", 240.0).await.unwrap();
        assert_eq!(created.name, "1 bowl");
        assert!(!created.is_default);
        assert_eq!(session.len(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_case_insensitive_duplicate() {
        let mut session = session_with(&[("Cup", "cup", 240.0)]).await;
        let err = session.add("cup", "Cup", 100.0).await.unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateServing { .. }));
        assert_eq!(session.len(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_out_of_range_fields() {
        let mut session = session_with(&[]).await;
        let err = session.add("x", "cup", 240.0).await.unwrap_err();
        let CatalogError::Validation(fields) = err else {
            panic!("expected validation error");
        };
        assert_eq!(fields.len(), 1);
        assert!(session.is_empty());
    }

    #[tokio::test]
    async fn test_edit_excludes_self_from_duplicate_check() {
        let mut session = session_with(&[("1 bowl", "bowl", 240.0)]).await;
        let id = session.servings()[0].id;
        let patch = ServingPatch {
            grams_per_unit: Some(250.0),
            ..Default::default()
        };
        let updated = session.edit(id, patch).await.unwrap();
        assert_eq!(updated.grams_per_unit, 250.0);
    }

    #[tokio::test]
    async fn test_edit_rejects_collision_with_other_serving() {
        let mut session = session_with(&[("1 bowl", "bowl", 240.0), ("1 cup", "cup", 120.0)]).await;
        let cup_id = session.servings()[1].id;
        let patch = ServingPatch {
            name: Some("1 Bowl".to_string()),
            unit: Some("BOWL".to_string()),
            ..Default::default()
        };
        let err = session.edit(cup_id, patch).await.unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateServing { .. }));
    }

    #[tokio::test]
    async fn test_edit_missing_serving_is_not_found() {
        let mut session = session_with(&[]).await;
        let err = session.edit(99, ServingPatch::default()).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound));
    }

    #[tokio::test]
    async fn test_set_default_swap_leaves_exactly_one() {
        let mut session = session_with(&[("1 bowl", "bowl", 240.0), ("1 cup", "cup", 120.0)]).await;
        let a = session.servings()[0].id;
        let b = session.servings()[1].id;

        session.set_default(a).await.unwrap();
        session.set_default(b).await.unwrap();

        let defaults: Vec<_> = session.servings().iter().filter(|s| s.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].id, b);
        assert!(!session.get(a).unwrap().is_default);
        assert_eq!(session.resolve_default(), DefaultServing::Explicit(b));
    }

    #[tokio::test]
    async fn test_remove_default_reverts_to_system() {
        let mut session = session_with(&[("1 bowl", "bowl", 240.0)]).await;
        let id = session.servings()[0].id;
        session.set_default(id).await.unwrap();

        session.remove(id).await.unwrap();
        assert_eq!(session.resolve_default(), DefaultServing::System);
        assert_eq!(SYSTEM_DEFAULT_GRAMS, 100.0);
    }

    #[tokio::test]
    async fn test_unset_default_reverts_to_system() {
        let mut session = session_with(&[("1 bowl", "bowl", 240.0)]).await;
        let id = session.servings()[0].id;
        session.set_default(id).await.unwrap();
        session.unset_default(id).await.unwrap();
        assert!(session.resolve_default().is_system());
    }

    #[tokio::test]
    async fn test_remove_referenced_serving_leaves_catalog_unchanged() {
        let store = MemoryServingStore::new();
        let id = store.seed_serving(7, "1 bowl", "bowl", 240.0);
        store.mark_referenced(id);
        let mut session = CatalogSession::open(store, 7).await.unwrap();

        let before = session.servings().to_vec();
        let err = session.remove(id).await.unwrap_err();
        assert!(matches!(err, CatalogError::ReferencedByLog));
        assert_eq!(session.servings(), &before[..]);
    }

    #[tokio::test]
    async fn test_transient_failure_leaves_state_and_allows_retry() {
        let store = MemoryServingStore::new();
        let mut session = CatalogSession::open(store, 7).await.unwrap();
        session.store.fail_next("connection reset");

        let err = session.add("1 bowl", "bowl", 240.0).await.unwrap_err();
        assert!(matches!(err, CatalogError::TransientFailure(_)));
        assert!(session.is_empty());

        // The same operation retried succeeds once the store recovers.
        session.add("1 bowl", "bowl", 240.0).await.unwrap();
        assert_eq!(session.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_defaults_in_snapshot_keep_first() {
        let store = MemoryServingStore::new();
        let a = store.seed_serving(7, "1 bowl", "bowl", 240.0);
        let b = store.seed_serving(7, "1 cup", "cup", 120.0);
        store.force_default(a);
        store.force_default_unchecked(b);

        let session = CatalogSession::open(store, 7).await.unwrap();
        assert_eq!(session.resolve_default(), DefaultServing::Explicit(a));
        let defaults = session.servings().iter().filter(|s| s.is_default).count();
        assert_eq!(defaults, 1);
    }
}
