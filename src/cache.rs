use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;

use crate::{
    merge,
    types::{Catalog, CatalogOrigin, RawCollections},
};

impl Catalog {
    /// Merges `raw` and stamps the result. Runs outside any cache lock.
    pub fn build(raw: RawCollections, origin: CatalogOrigin) -> Self {
        let view = merge::merge_raw(&raw);
        Self {
            raw,
            view,
            origin,
            built_at: Some(Utc::now()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.origin == CatalogOrigin::Empty || self.raw.is_empty()
    }

    pub fn artist_count(&self) -> usize {
        self.view.artists.len()
    }
}

/// Process-wide holder of the authoritative [`Catalog`].
///
/// Readers get an `Arc` to an immutable catalog and never block each other.
/// Writers build the next catalog first and only take the write lock to swap
/// the pointer, so a reader sees either the old catalog or the new one in
/// full.
#[derive(Debug, Default)]
pub struct CacheStore {
    current: RwLock<Arc<Catalog>>,
}

impl CacheStore {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
        }
    }

    pub fn read(&self) -> Arc<Catalog> {
        // The guarded value is a single pointer, a poisoned lock still holds a valid one.
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Installs `catalog` and returns the one it replaced.
    pub fn replace(&self, catalog: Catalog) -> Arc<Catalog> {
        let next = Arc::new(catalog);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }
}
