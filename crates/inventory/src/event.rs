use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{CategoryId, ProductId};
use stockroom_events::Event;

/// Event: ProductAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductAdded {
    pub product_id: ProductId,
    pub name: String,
    pub sku: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdated {
    pub product_id: ProductId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ProductDeleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDeleted {
    pub product_id: ProductId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: StockUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdated {
    pub product_id: ProductId,
    pub previous_quantity: i64,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CategoryAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryAdded {
    pub category_id: CategoryId,
    pub name: String,
    pub occurred_at: DateTime<Utc>,
}

/// One committed change to the inventory, published after the fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryEvent {
    ProductAdded(ProductAdded),
    ProductUpdated(ProductUpdated),
    ProductDeleted(ProductDeleted),
    StockUpdated(StockUpdated),
    CategoryAdded(CategoryAdded),
}

impl Event for InventoryEvent {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryEvent::ProductAdded(_) => "inventory.product.added",
            InventoryEvent::ProductUpdated(_) => "inventory.product.updated",
            InventoryEvent::ProductDeleted(_) => "inventory.product.deleted",
            InventoryEvent::StockUpdated(_) => "inventory.product.stock_updated",
            InventoryEvent::CategoryAdded(_) => "inventory.category.added",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryEvent::ProductAdded(e) => e.occurred_at,
            InventoryEvent::ProductUpdated(e) => e.occurred_at,
            InventoryEvent::ProductDeleted(e) => e.occurred_at,
            InventoryEvent::StockUpdated(e) => e.occurred_at,
            InventoryEvent::CategoryAdded(e) => e.occurred_at,
        }
    }

    fn message(&self) -> String {
        let text = match self {
            InventoryEvent::ProductAdded(_) => "Product added successfully",
            InventoryEvent::ProductUpdated(_) => "Product updated successfully",
            InventoryEvent::ProductDeleted(_) => "Product deleted successfully",
            InventoryEvent::StockUpdated(_) => "Stock updated successfully",
            InventoryEvent::CategoryAdded(_) => "Category added successfully",
        };
        text.to_string()
    }
}

impl InventoryEvent {
    /// The product this event is about, if any.
    pub fn product_id(&self) -> Option<ProductId> {
        match self {
            InventoryEvent::ProductAdded(e) => Some(e.product_id),
            InventoryEvent::ProductUpdated(e) => Some(e.product_id),
            InventoryEvent::ProductDeleted(e) => Some(e.product_id),
            InventoryEvent::StockUpdated(e) => Some(e.product_id),
            InventoryEvent::CategoryAdded(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn stock_update_reads_as_a_notification() {
        let id = ProductId::new();
        let event = InventoryEvent::StockUpdated(StockUpdated {
            product_id: id,
            previous_quantity: 5,
            quantity: 0,
            occurred_at: at(),
        });

        assert_eq!(event.event_type(), "inventory.product.stock_updated");
        assert_eq!(event.version(), 1);
        assert_eq!(event.occurred_at(), at());
        assert_eq!(event.message(), "Stock updated successfully");
        assert_eq!(event.product_id(), Some(id));
    }

    #[test]
    fn category_events_carry_no_product() {
        let event = InventoryEvent::CategoryAdded(CategoryAdded {
            category_id: CategoryId::new(),
            name: "Beverages".to_string(),
            occurred_at: at(),
        });
        assert_eq!(event.product_id(), None);
        assert_eq!(event.event_type(), "inventory.category.added");
    }

    #[test]
    fn serializes_externally_tagged() {
        let event = InventoryEvent::ProductDeleted(ProductDeleted {
            product_id: ProductId::new(),
            name: "Bread".to_string(),
            occurred_at: at(),
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["ProductDeleted"]["name"], "Bread");

        let back: InventoryEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, event);
    }
}
