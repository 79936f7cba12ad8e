//! Inventory summary projection.
//!
//! The summary is a pure function of the product collection: the store rebuilds
//! it from scratch after every committed product mutation instead of patching it
//! incrementally, so it can never drift from the collection it describes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockroom_core::Money;
use stockroom_products::Product;

/// Dashboard metrics derived from the current product collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySummary {
    total_products: usize,
    /// Σ quantity × buying price, unrounded.
    total_value: Money,
    /// Products at or below their reorder level.
    low_stock_items: usize,
    /// Keyed by the literal category string on each product, whether or not a
    /// matching `Category` exists. Sorted by name.
    category_counts: BTreeMap<String, usize>,
}

impl InventorySummary {
    /// Recompute every metric in a single pass.
    pub fn project(products: &[Product]) -> Self {
        let mut summary = Self {
            total_products: products.len(),
            ..Self::default()
        };

        for product in products {
            summary.total_value = summary.total_value + product.stock_value();

            if product.is_low_stock() {
                summary.low_stock_items += 1;
            }

            *summary
                .category_counts
                .entry(product.category().to_string())
                .or_insert(0) += 1;
        }

        summary
    }

    pub fn total_products(&self) -> usize {
        self.total_products
    }

    pub fn total_value(&self) -> Money {
        self.total_value
    }

    pub fn low_stock_items(&self) -> usize {
        self.low_stock_items
    }

    pub fn category_counts(&self) -> &BTreeMap<String, usize> {
        &self.category_counts
    }

    /// Number of products filed under `category`; 0 for unknown names.
    pub fn category_count(&self, category: &str) -> usize {
        self.category_counts.get(category).copied().unwrap_or(0)
    }
}
