//! Dashboard and settings-screen reports over the current store state.

use stockroom_core::Money;
use stockroom_products::{Category, Product};

use crate::store::InventoryStore;

impl InventoryStore {
    /// The `n` most valuable products by stock value (quantity × buying price),
    /// highest first. Ties keep collection order.
    pub fn top_products_by_value(&self, n: usize) -> Vec<&Product> {
        let mut ranked: Vec<&Product> = self.products().iter().collect();
        ranked.sort_by(|a, b| b.stock_value().cmp(&a.stock_value()));
        ranked.truncate(n);
        ranked
    }

    /// Products at or below their reorder level, in collection order.
    pub fn low_stock_products(&self) -> Vec<&Product> {
        self.products().iter().filter(|p| p.is_low_stock()).collect()
    }

    /// `(category name, product count)` pairs sorted by name.
    pub fn category_breakdown(&self) -> Vec<(&str, usize)> {
        self.summary()
            .category_counts()
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect()
    }

    /// Every category with the number of products filed under its name.
    pub fn categories_with_counts(&self) -> Vec<(&Category, usize)> {
        self.categories()
            .iter()
            .map(|c| (c, self.summary().category_count(c.name())))
            .collect()
    }

    /// Σ quantity × selling price.
    pub fn potential_revenue(&self) -> Money {
        self.products().iter().map(Product::retail_value).sum()
    }

    /// Revenue if all stock sold at list price, minus what it cost.
    pub fn potential_profit(&self) -> Money {
        self.potential_revenue() - self.summary().total_value()
    }
}
