//! The dashboard report: headline metrics, category breakdown, most valuable
//! stock and the reorder list.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use stockroom_core::Money;
use stockroom_inventory::{InventoryStore, InventorySummary};
use stockroom_products::Product;

use crate::format::{format_currency, format_date};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRow<'a> {
    pub name: &'a str,
    pub products: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRow<'a> {
    pub name: &'a str,
    pub sku: &'a str,
    pub category: &'a str,
    pub quantity: i64,
    pub reorder_level: i64,
    pub stock_value: Money,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Product> for ProductRow<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            name: product.name(),
            sku: product.sku(),
            category: product.category(),
            quantity: product.quantity(),
            reorder_level: product.reorder_level(),
            stock_value: product.stock_value(),
            updated_at: product.updated_at(),
        }
    }
}

/// A read-only snapshot of the store, borrowed for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard<'a> {
    pub summary: &'a InventorySummary,
    pub potential_revenue: Money,
    pub potential_profit: Money,
    pub categories: Vec<CategoryRow<'a>>,
    pub top_products: Vec<ProductRow<'a>>,
    pub low_stock: Vec<ProductRow<'a>>,
}

impl<'a> Dashboard<'a> {
    pub fn build(store: &'a InventoryStore, top_n: usize) -> Self {
        Self {
            summary: store.summary(),
            potential_revenue: store.potential_revenue(),
            potential_profit: store.potential_profit(),
            categories: store
                .category_breakdown()
                .into_iter()
                .map(|(name, products)| CategoryRow { name, products })
                .collect(),
            top_products: store
                .top_products_by_value(top_n)
                .into_iter()
                .map(ProductRow::from)
                .collect(),
            low_stock: store
                .low_stock_products()
                .into_iter()
                .map(ProductRow::from)
                .collect(),
        }
    }
}

impl fmt::Display for Dashboard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Inventory dashboard")?;
        writeln!(f, "===================")?;
        writeln!(f, "{:<20}{}", "Total products", self.summary.total_products())?;
        writeln!(f, "{:<20}{}", "Stock value", format_currency(self.summary.total_value()))?;
        writeln!(f, "{:<20}{}", "Low stock items", self.summary.low_stock_items())?;
        writeln!(f, "{:<20}{}", "Potential revenue", format_currency(self.potential_revenue))?;
        writeln!(f, "{:<20}{}", "Potential profit", format_currency(self.potential_profit))?;

        writeln!(f)?;
        writeln!(f, "Products by category")?;
        if self.categories.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for row in &self.categories {
            writeln!(f, "  {:<24}{:>5}", row.name, row.products)?;
        }

        writeln!(f)?;
        writeln!(f, "Top {} products by value", self.top_products.len())?;
        if self.top_products.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for row in &self.top_products {
            writeln!(
                f,
                "  {:<26}{:<10}{:>6} units  {:>18}",
                row.name,
                row.sku,
                row.quantity,
                format_currency(row.stock_value)
            )?;
        }

        writeln!(f)?;
        writeln!(f, "Low stock")?;
        if self.low_stock.is_empty() {
            writeln!(f, "  (none)")?;
        }
        for row in &self.low_stock {
            writeln!(
                f,
                "  {:<26}{:<10}{:>6} / reorder at {:<6} updated {}",
                row.name,
                row.sku,
                row.quantity,
                row.reorder_level,
                format_date(row.updated_at)
            )?;
        }

        Ok(())
    }
}

pub fn render_text(dashboard: &Dashboard<'_>) -> String {
    dashboard.to_string()
}

pub fn render_json(dashboard: &Dashboard<'_>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(dashboard)
}
