//! In-memory serving store
//!
//! Reference `ServingStore` used by tests and demos. Mirrors the checks a
//! real backend performs (duplicate key, log references, missing rows) and
//! can inject one-shot transient failures to exercise fire-and-confirm
//! behavior at the session layer.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Food, Serving, ServingCreate, ServingPatch};

use super::store::{CatalogSnapshot, FoodProvider, ServingStore};

#[derive(Default)]
struct Inner {
    servings: HashMap<i64, Vec<Serving>>,
    referenced: HashSet<i64>,
    next_id: i64,
    fail_next: Option<String>,
}

impl Inner {
    fn take_failure(&mut self) -> CatalogResult<()> {
        match self.fail_next.take() {
            Some(reason) => Err(CatalogError::TransientFailure(reason)),
            None => Ok(()),
        }
    }

    fn food_servings_mut(&mut self, food_id: i64) -> &mut Vec<Serving> {
        self.servings.entry(food_id).or_default()
    }
}

/// In-memory `ServingStore` implementation
#[derive(Default)]
pub struct MemoryServingStore {
    inner: Mutex<Inner>,
}

impl MemoryServingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a serving directly, bypassing validation; returns its id
    pub fn seed_serving(&self, food_id: i64, name: &str, unit: &str, grams_per_unit: f64) -> i64 {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.food_servings_mut(food_id).push(Serving {
            id,
            food_id,
            name: name.to_string(),
            unit: unit.to_string(),
            grams_per_unit,
            is_default: false,
            created_at: Utc::now().to_rfc3339(),
        });
        id
    }

    /// Mark a serving as referenced by meal logs, blocking deletion
    pub fn mark_referenced(&self, serving_id: i64) {
        self.inner.lock().unwrap().referenced.insert(serving_id);
    }

    /// Fail the next store call with a transient error
    pub fn fail_next(&self, reason: &str) {
        self.inner.lock().unwrap().fail_next = Some(reason.to_string());
    }

    /// Set a serving as its food's only default
    pub fn force_default(&self, serving_id: i64) {
        let mut inner = self.inner.lock().unwrap();
        for servings in inner.servings.values_mut() {
            if servings.iter().any(|s| s.id == serving_id) {
                for s in servings.iter_mut() {
                    s.is_default = s.id == serving_id;
                }
            }
        }
    }

    /// Flag a serving as default WITHOUT clearing others
    ///
    /// Only exists to simulate corrupt storage in tests of the session's
    /// duplicate-default normalization.
    pub fn force_default_unchecked(&self, serving_id: i64) {
        let mut inner = self.inner.lock().unwrap();
        for servings in inner.servings.values_mut() {
            for s in servings.iter_mut() {
                if s.id == serving_id {
                    s.is_default = true;
                }
            }
        }
    }
}

#[async_trait]
impl ServingStore for MemoryServingStore {
    async fn load(&self, food_id: i64) -> CatalogResult<CatalogSnapshot> {
        let mut inner = self.inner.lock().unwrap();
        inner.take_failure()?;
        Ok(CatalogSnapshot {
            servings: inner.servings.get(&food_id).cloned().unwrap_or_default(),
        })
    }

    async fn create(&self, food_id: i64, data: &ServingCreate) -> CatalogResult<Serving> {
        let mut inner = self.inner.lock().unwrap();
        inner.take_failure()?;

        let servings = inner.food_servings_mut(food_id);
        if let Some(existing) = servings
            .iter()
            .find(|s| s.matches_name_unit(&data.name, &data.unit))
        {
            return Err(CatalogError::DuplicateServing {
                name: existing.name.clone(),
                unit: existing.unit.clone(),
            });
        }

        inner.next_id += 1;
        let id = inner.next_id;
        let serving = Serving {
            id,
            food_id,
            name: data.name.clone(),
            unit: data.unit.clone(),
            grams_per_unit: data.grams_per_unit,
            is_default: false,
            created_at: Utc::now().to_rfc3339(),
        };
        inner.food_servings_mut(food_id).push(serving.clone());
        Ok(serving)
    }

    async fn update(
        &self,
        food_id: i64,
        serving_id: i64,
        patch: &ServingPatch,
    ) -> CatalogResult<Serving> {
        let mut inner = self.inner.lock().unwrap();
        inner.take_failure()?;

        let servings = inner.food_servings_mut(food_id);
        let candidate = {
            let current = servings
                .iter()
                .find(|s| s.id == serving_id)
                .ok_or(CatalogError::NotFound)?;
            let name = patch.name.as_deref().unwrap_or(&current.name);
            let unit = patch.unit.as_deref().unwrap_or(&current.unit);
            (name.to_string(), unit.to_string())
        };
        if let Some(existing) = servings
            .iter()
            .filter(|s| s.id != serving_id)
            .find(|s| s.matches_name_unit(&candidate.0, &candidate.1))
        {
            return Err(CatalogError::DuplicateServing {
                name: existing.name.clone(),
                unit: existing.unit.clone(),
            });
        }

        let serving = servings
            .iter_mut()
            .find(|s| s.id == serving_id)
            .ok_or(CatalogError::NotFound)?;
        patch.apply_to(serving);
        Ok(serving.clone())
    }

    async fn delete(&self, food_id: i64, serving_id: i64) -> CatalogResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.take_failure()?;

        if inner.referenced.contains(&serving_id) {
            return Err(CatalogError::ReferencedByLog);
        }
        let servings = inner.food_servings_mut(food_id);
        let before = servings.len();
        servings.retain(|s| s.id != serving_id);
        if servings.len() == before {
            return Err(CatalogError::NotFound);
        }
        Ok(())
    }

    async fn set_default(&self, food_id: i64, serving_id: i64) -> CatalogResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.take_failure()?;

        let servings = inner.food_servings_mut(food_id);
        if !servings.iter().any(|s| s.id == serving_id) {
            return Err(CatalogError::NotFound);
        }
        for s in servings.iter_mut() {
            s.is_default = s.id == serving_id;
        }
        Ok(())
    }

    async fn unset_default(&self, food_id: i64, serving_id: i64) -> CatalogResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.take_failure()?;

        let servings = inner.food_servings_mut(food_id);
        let serving = servings
            .iter_mut()
            .find(|s| s.id == serving_id)
            .ok_or(CatalogError::NotFound)?;
        serving.is_default = false;
        Ok(())
    }
}

/// In-memory `FoodProvider` backed by a fixed food map
#[derive(Default)]
pub struct MemoryFoodProvider {
    foods: Mutex<HashMap<i64, Food>>,
}

impl MemoryFoodProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, food: Food) {
        self.foods.lock().unwrap().insert(food.id, food);
    }
}

#[async_trait]
impl FoodProvider for MemoryFoodProvider {
    async fn fetch(&self, food_id: i64) -> CatalogResult<Food> {
        self.foods
            .lock()
            .unwrap()
            .get(&food_id)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }
}
