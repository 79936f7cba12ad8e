//! End-to-end session against the demo catalog: the flows a shop keeper
//! walks through on the dashboard, product list and settings screens.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use stockroom_core::{DomainError, ManualClock, Money, ProductId};
use stockroom_events::{Event, EventBus, InMemoryEventBus, publisher_for};
use stockroom_inventory::{InventoryEvent, InventoryStore, InventorySummary, ProductFilter};
use stockroom_products::{NewCategory, NewProduct, ProductPatch};

fn rice() -> NewProduct {
    NewProduct {
        name: "Rice (2kg)".to_string(),
        description: "Long grain rice".to_string(),
        category: "Food".to_string(),
        sku: "FD-010".to_string(),
        quantity: 3,
        buying_price: Money::from_major(200),
        selling_price: Money::from_major(250),
        reorder_level: 5,
        image_url: None,
    }
}

fn assert_fresh(store: &InventoryStore) {
    assert_eq!(store.summary(), &InventorySummary::project(store.products()));
}

#[test]
fn adding_a_low_stock_product_moves_every_metric() {
    let mut store = InventoryStore::with_demo_data();
    let before = store.summary().clone();

    let id = store.add_product(rice()).unwrap();

    let after = store.summary();
    assert_eq!(after.total_products(), before.total_products() + 1);
    assert_eq!(after.total_value(), before.total_value() + Money::from_major(600));
    assert_eq!(after.low_stock_items(), before.low_stock_items() + 1);
    assert_eq!(after.category_count("Food"), before.category_count("Food") + 1);

    let product = store.product(id).unwrap();
    assert_eq!(product.image_url(), "/placeholder.svg");
    assert_fresh(&store);
}

#[test]
fn stock_to_zero_then_restock() {
    let mut store = InventoryStore::with_demo_data();
    let flour = store.filter_products("FL-001", "all", false)[0].id_typed();
    let before = store.summary().clone();

    let emptied = store.update_stock(flour, 0).unwrap();
    assert_eq!(emptied.quantity(), 0);
    assert!(emptied.is_low_stock());
    assert_eq!(store.summary().low_stock_items(), before.low_stock_items() + 1);
    // 45 × 120 left the books.
    assert_eq!(store.summary().total_value(), before.total_value() - Money::from_major(5_400));

    store.update_stock(flour, 45).unwrap();
    assert_eq!(store.summary(), &before);
}

#[test]
fn deleting_an_unknown_product_changes_nothing() {
    let bus: Arc<InMemoryEventBus<InventoryEvent>> = Arc::new(InMemoryEventBus::new());
    let events = bus.subscribe();
    let mut store = InventoryStore::with_demo_data().with_publisher(bus);
    let before = store.summary().clone();

    assert!(store.delete_product(ProductId::new()).is_none());

    assert_eq!(store.products().len(), 8);
    assert_eq!(store.summary(), &before);
    assert!(events.drain().is_empty());
}

#[test]
fn search_is_case_insensitive_over_name_and_sku() {
    let store = InventoryStore::with_demo_data();

    let by_name = store.filter_products("MAIZE", "", false);
    let by_sku = store.filter_products("fl-001", "all", false);
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id_typed(), by_sku[0].id_typed());

    // "" and "all" both mean every category.
    assert_eq!(store.filter_products("", "", false).len(), 8);
    assert_eq!(store.filter_products("", "all", false).len(), 8);

    let stationery = store.filter_products("", "Stationery", false);
    assert_eq!(stationery.len(), 2);

    let low_food = store.query(&ProductFilter::all().category("Food").low_stock_only(true));
    assert_eq!(low_food.len(), 1);
    assert_eq!(low_food[0].name(), "Bread");
}

#[test]
fn full_session_notifies_once_per_successful_mutation() {
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()));
    let bus: Arc<InMemoryEventBus<InventoryEvent>> = Arc::new(InMemoryEventBus::new());
    let events = bus.subscribe();
    let mut store = InventoryStore::with_demo_data()
        .with_clock(clock.clone())
        .with_publisher(publisher_for(bus));

    let rice_id = store.add_product(rice()).unwrap();
    store
        .update_product(rice_id, ProductPatch::new().selling_price(Money::from_major(260)))
        .unwrap();
    store.update_stock(rice_id, 40).unwrap();
    store.add_category(NewCategory::new("Beverages", "Drinks")).unwrap();

    // Rejected writes are silent.
    let dup = store.add_category(NewCategory::new("  food ", "again"));
    assert_eq!(dup, Err(DomainError::conflict("Category already exists")));
    assert!(store.update_stock(ProductId::new(), 1).unwrap_err().is_not_found());
    assert!(matches!(
        store.add_product(NewProduct::default()),
        Err(DomainError::Validation(_))
    ));

    store.delete_product(rice_id).unwrap();

    let messages: Vec<String> = events.drain().iter().map(Event::message).collect();
    assert_eq!(
        messages,
        vec![
            "Product added successfully",
            "Product updated successfully",
            "Stock updated successfully",
            "Category added successfully",
            "Product deleted successfully",
        ]
    );

    assert_eq!(store.categories().len(), 4);
    assert_eq!(store.category_product_count("Beverages"), 0);
    assert_eq!(store.products().len(), 8);
    assert_fresh(&store);
}
