//! Inventory engine: the product/category store, its derived summary,
//! filtering, reports, and change notifications.
//!
//! Pure in-process logic (no IO, no HTTP, no storage).

pub mod event;
pub mod filter;
pub mod reports;
pub mod seed;
pub mod shared;
pub mod store;
pub mod summary;

pub use event::{
    CategoryAdded, InventoryEvent, ProductAdded, ProductDeleted, ProductUpdated, StockUpdated,
};
pub use filter::{CategoryFilter, ProductFilter};
pub use seed::{demo_categories, demo_products};
pub use shared::SharedInventory;
pub use store::InventoryStore;
pub use summary::InventorySummary;
