//! Thread-safe handle over one [`InventoryStore`].
//!
//! Writers serialize on the lock, so each mutation and its summary recompute
//! are observed together. Reads hand back owned copies.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use stockroom_core::{CategoryId, DomainResult, ProductId};
use stockroom_products::{Category, NewCategory, NewProduct, Product, ProductPatch};

use crate::store::InventoryStore;
use crate::summary::InventorySummary;

#[derive(Debug, Clone)]
pub struct SharedInventory {
    inner: Arc<RwLock<InventoryStore>>,
}

impl SharedInventory {
    pub fn new(store: InventoryStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Run `f` against a read guard.
    pub fn read<R>(&self, f: impl FnOnce(&InventoryStore) -> R) -> R {
        f(&self.read_guard())
    }

    /// Run `f` against a write guard.
    pub fn write<R>(&self, f: impl FnOnce(&mut InventoryStore) -> R) -> R {
        f(&mut self.write_guard())
    }

    pub fn add_product(&self, fields: NewProduct) -> DomainResult<ProductId> {
        self.write(|store| store.add_product(fields))
    }

    pub fn update_product(&self, id: ProductId, patch: ProductPatch) -> DomainResult<Product> {
        self.write(|store| store.update_product(id, patch))
    }

    pub fn delete_product(&self, id: ProductId) -> Option<Product> {
        self.write(|store| store.delete_product(id))
    }

    pub fn update_stock(&self, id: ProductId, quantity: i64) -> DomainResult<Product> {
        self.write(|store| store.update_stock(id, quantity))
    }

    pub fn add_category(&self, fields: NewCategory) -> DomainResult<CategoryId> {
        self.write(|store| store.add_category(fields))
    }

    pub fn summary(&self) -> InventorySummary {
        self.read(|store| store.summary().clone())
    }

    pub fn products(&self) -> Vec<Product> {
        self.read(|store| store.products().to_vec())
    }

    pub fn categories(&self) -> Vec<Category> {
        self.read(|store| store.categories().to_vec())
    }

    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.read(|store| store.product(id).cloned())
    }

    pub fn filter_products(&self, search: &str, category: &str, low_stock_only: bool) -> Vec<Product> {
        self.read(|store| {
            store
                .filter_products(search, category, low_stock_only)
                .into_iter()
                .cloned()
                .collect()
        })
    }

    // A panicking writer never leaves the store half-updated: the summary is
    // recomputed before any call returns, so a poisoned lock is still usable.
    fn read_guard(&self) -> RwLockReadGuard<'_, InventoryStore> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, InventoryStore> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SharedInventory {
    fn default() -> Self {
        Self::new(InventoryStore::new())
    }
}

impl From<InventoryStore> for SharedInventory {
    fn from(store: InventoryStore) -> Self {
        Self::new(store)
    }
}
