//! The entity store: canonical product/category collections plus their summary.

use std::collections::HashSet;
use std::sync::Arc;

use stockroom_core::entity::{find_by_id, position_of};
use stockroom_core::{CategoryId, Clock, DomainError, DomainResult, ProductId, SystemClock};
use stockroom_events::{Event, EventPublisher};
use stockroom_products::{Category, NewCategory, NewProduct, Product, ProductPatch};

use crate::event::{
    CategoryAdded, InventoryEvent, ProductAdded, ProductDeleted, ProductUpdated, StockUpdated,
};
use crate::filter::{CategoryFilter, ProductFilter};
use crate::summary::InventorySummary;

/// Owner of the product and category collections.
///
/// This is the only write path: it assigns ids, stamps times, validates input,
/// and recomputes the [`InventorySummary`] as the last step of every product
/// mutation, so `summary()` is never stale once a call has returned.
///
/// Products keep insertion order; queries return them in that order.
pub struct InventoryStore {
    products: Vec<Product>,
    categories: Vec<Category>,
    summary: InventorySummary,
    clock: Arc<dyn Clock>,
    publisher: Option<Arc<dyn EventPublisher<InventoryEvent>>>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::assemble(Vec::new(), Vec::new())
    }

    /// Build a store around entities created elsewhere (e.g. deserialized).
    ///
    /// Every product must pass [`Product::validate`]; product ids, category ids
    /// and category names (ignoring case) must be unique.
    pub fn from_parts(products: Vec<Product>, categories: Vec<Category>) -> DomainResult<Self> {
        let mut product_ids = HashSet::with_capacity(products.len());
        for product in &products {
            product.validate()?;
            if !product_ids.insert(product.id_typed()) {
                return Err(DomainError::conflict(format!(
                    "Duplicate product id {}",
                    product.id_typed()
                )));
            }
        }

        let mut category_ids = HashSet::with_capacity(categories.len());
        for (i, category) in categories.iter().enumerate() {
            if !category_ids.insert(category.id_typed()) {
                return Err(DomainError::conflict(format!(
                    "Duplicate category id {}",
                    category.id_typed()
                )));
            }
            if categories[..i].iter().any(|c| c.has_name(category.name())) {
                return Err(DomainError::conflict("Category already exists"));
            }
        }

        Ok(Self::assemble(products, categories))
    }

    /// Unchecked; callers guarantee the invariants `from_parts` verifies.
    pub(crate) fn assemble(products: Vec<Product>, categories: Vec<Category>) -> Self {
        let summary = InventorySummary::project(&products);
        Self {
            products,
            categories,
            summary,
            clock: Arc::new(SystemClock),
            publisher: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Publish one [`InventoryEvent`] per successful mutation through `publisher`.
    pub fn with_publisher(mut self, publisher: Arc<dyn EventPublisher<InventoryEvent>>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn summary(&self) -> &InventorySummary {
        &self.summary
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        find_by_id(&self.products, &id)
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        find_by_id(&self.categories, &id)
    }

    /// Case-insensitive lookup by name.
    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.has_name(name))
    }

    /// Products filed under `name`, counted from the summary.
    pub fn category_product_count(&self, name: &str) -> usize {
        self.summary.category_count(name)
    }

    /// Search by name/SKU, restrict by category (`""`/`"all"` = any) and
    /// optionally to low-stock products.
    pub fn filter_products(
        &self,
        search: &str,
        category: &str,
        low_stock_only: bool,
    ) -> Vec<&Product> {
        self.query(&ProductFilter::new(
            search,
            CategoryFilter::parse(category),
            low_stock_only,
        ))
    }

    pub fn query(&self, filter: &ProductFilter) -> Vec<&Product> {
        filter.apply(&self.products)
    }

    pub fn add_product(&mut self, fields: NewProduct) -> DomainResult<ProductId> {
        fields.validate()?;

        let id = ProductId::new();
        let now = self.clock.now();
        let product = Product::create(id, fields, now);

        let event = InventoryEvent::ProductAdded(ProductAdded {
            product_id: id,
            name: product.name().to_string(),
            sku: product.sku().to_string(),
            occurred_at: now,
        });

        self.products.push(product);
        self.commit_products(event);

        tracing::info!(product_id = %id, "product added");
        Ok(id)
    }

    /// Merge `patch` into the product; `NotFound` when `id` is unknown.
    pub fn update_product(&mut self, id: ProductId, patch: ProductPatch) -> DomainResult<Product> {
        let index = position_of(&self.products, &id).ok_or_else(DomainError::not_found)?;
        patch.validate()?;

        let now = self.clock.now();
        let product = &mut self.products[index];
        product.apply_patch(patch, now);
        let updated = product.clone();

        self.commit_products(InventoryEvent::ProductUpdated(ProductUpdated {
            product_id: id,
            name: updated.name().to_string(),
            occurred_at: now,
        }));

        tracing::info!(product_id = %id, "product updated");
        Ok(updated)
    }

    /// Remove the product; an unknown `id` is a no-op and returns `None`.
    pub fn delete_product(&mut self, id: ProductId) -> Option<Product> {
        let Some(index) = position_of(&self.products, &id) else {
            tracing::debug!(product_id = %id, "delete ignored: no such product");
            return None;
        };

        let removed = self.products.remove(index);

        self.commit_products(InventoryEvent::ProductDeleted(ProductDeleted {
            product_id: id,
            name: removed.name().to_string(),
            occurred_at: self.clock.now(),
        }));

        tracing::info!(product_id = %id, "product deleted");
        Some(removed)
    }

    /// Overwrite the on-hand quantity; `NotFound` when `id` is unknown.
    pub fn update_stock(&mut self, id: ProductId, quantity: i64) -> DomainResult<Product> {
        let index = position_of(&self.products, &id).ok_or_else(DomainError::not_found)?;
        if quantity < 0 {
            return Err(DomainError::validation("Quantity cannot be negative"));
        }

        let now = self.clock.now();
        let product = &mut self.products[index];
        let previous_quantity = product.quantity();
        product.set_quantity(quantity, now);
        let updated = product.clone();

        self.commit_products(InventoryEvent::StockUpdated(StockUpdated {
            product_id: id,
            previous_quantity,
            quantity,
            occurred_at: now,
        }));

        tracing::info!(product_id = %id, previous_quantity, quantity, "stock updated");
        Ok(updated)
    }

    /// Add a category; names are trimmed and must be unique ignoring case.
    pub fn add_category(&mut self, fields: NewCategory) -> DomainResult<CategoryId> {
        let fields = fields.normalized();
        fields.validate()?;

        if self.category_by_name(&fields.name).is_some() {
            return Err(DomainError::conflict("Category already exists"));
        }

        let id = CategoryId::new();
        let category = Category::create(id, fields);
        let event = InventoryEvent::CategoryAdded(CategoryAdded {
            category_id: id,
            name: category.name().to_string(),
            occurred_at: self.clock.now(),
        });

        self.categories.push(category);
        self.notify(event);

        tracing::info!(category_id = %id, "category added");
        Ok(id)
    }

    // Summary first, then the notification: subscribers may read the store.
    fn commit_products(&mut self, event: InventoryEvent) {
        self.recompute_summary();
        self.notify(event);
    }

    fn recompute_summary(&mut self) {
        self.summary = InventorySummary::project(&self.products);
        tracing::debug!(
            total_products = self.summary.total_products(),
            low_stock_items = self.summary.low_stock_items(),
            total_value = %self.summary.total_value(),
            "inventory summary recomputed"
        );
    }

    fn notify(&self, event: InventoryEvent) {
        let Some(publisher) = &self.publisher else {
            return;
        };

        let event_type = event.event_type();
        if let Err(err) = publisher.publish(event) {
            tracing::warn!(event_type, error = %err, "failed to publish inventory notification");
        }
    }
}

impl Default for InventoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for InventoryStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InventoryStore")
            .field("products", &self.products.len())
            .field("categories", &self.categories.len())
            .field("summary", &self.summary)
            .field("publisher", &self.publisher.is_some())
            .finish_non_exhaustive()
    }
}
