//! In-memory validation cache.

use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::cache::{
    BadEvent, CacheError, FiltersBad, FiltersGood, GoodEvent, GoodOrIncomplete, ValidationCache,
    ValidationSummary,
};
use crate::observability::metrics;

#[derive(Default)]
struct Store {
    /// Newest first.
    good: VecDeque<GoodEvent>,
    incomplete: VecDeque<Value>,
    bad: VecDeque<BadEvent>,
}

/// A thread-safe cache of validation results, kept entirely in memory.
#[derive(Default)]
pub struct InMemoryValidationCache {
    store: RwLock<Store>,
}

impl InMemoryValidationCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>, CacheError> {
        self.store
            .read()
            .map_err(|_| CacheError::Unavailable("store lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, CacheError> {
        self.store
            .write()
            .map_err(|_| CacheError::Unavailable("store lock poisoned".into()))
    }

    pub fn add_good(&self, event: GoodEvent) -> Result<(), CacheError> {
        let mut store = self.write()?;
        store.good.push_front(event);
        metrics::record_cache_size("good", store.good.len());
        Ok(())
    }

    /// Incomplete events are listed with good ones but counted as bad.
    pub fn add_incomplete(&self, event: Value) -> Result<(), CacheError> {
        let mut store = self.write()?;
        store.incomplete.push_front(event);
        metrics::record_cache_size("incomplete", store.incomplete.len());
        Ok(())
    }

    pub fn add_bad(&self, event: BadEvent) -> Result<(), CacheError> {
        let mut store = self.write()?;
        store.bad.push_front(event);
        metrics::record_cache_size("bad", store.bad.len());
        Ok(())
    }
}

impl ValidationCache for InMemoryValidationCache {
    fn get_good_and_incomplete(&self) -> Result<Vec<GoodOrIncomplete>, CacheError> {
        let store = self.read()?;
        let good = store.good.iter().cloned().map(GoodOrIncomplete::Good);
        let incomplete = store.incomplete.iter().cloned().map(GoodOrIncomplete::Incomplete);
        Ok(good.chain(incomplete).collect())
    }

    fn get_summary(&self) -> Result<ValidationSummary, CacheError> {
        let store = self.read()?;
        let good = store.good.len();
        let bad = store.bad.len() + store.incomplete.len();
        Ok(ValidationSummary {
            total: good + bad,
            good,
            bad,
        })
    }

    fn reset(&self) -> Result<(), CacheError> {
        let mut store = self.write()?;
        *store = Store::default();
        for kind in ["good", "incomplete", "bad"] {
            metrics::record_cache_size(kind, 0);
        }
        tracing::info!("Validation cache reset");
        Ok(())
    }

    fn filter_good(&self, filters: &FiltersGood) -> Result<Vec<GoodEvent>, CacheError> {
        let store = self.read()?;
        let limit = filters.limit.unwrap_or(usize::MAX);
        Ok(store
            .good
            .iter()
            .filter(|e| filters.matches(e))
            .take(limit)
            .cloned()
            .collect())
    }

    fn filter_bad(&self, filters: &FiltersBad) -> Result<Vec<BadEvent>, CacheError> {
        let store = self.read()?;
        let limit = filters.limit.unwrap_or(usize::MAX);
        Ok(store
            .bad
            .iter()
            .filter(|e| filters.matches(e))
            .take(limit)
            .cloned()
            .collect())
    }
}
