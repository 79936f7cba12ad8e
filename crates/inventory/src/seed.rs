//! Demo catalog for a fresh session: a small shop's staples.

use chrono::{DateTime, NaiveDate, Utc};

use stockroom_core::{CategoryId, Money, ProductId};
use stockroom_products::{Category, NewCategory, NewProduct, Product};

use crate::store::InventoryStore;

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    category: &'static str,
    sku: &'static str,
    quantity: i64,
    buying_price: i64,
    selling_price: i64,
    reorder_level: i64,
    created: (i32, u32, u32),
}

const CATEGORIES: &[(&str, &str)] = &[
    ("Food", "Edible products"),
    ("Stationery", "Office and school supplies"),
    ("Household", "Home and cleaning products"),
];

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        name: "Maize Flour (2kg)",
        description: "Premium maize flour for ugali",
        category: "Food",
        sku: "FL-001",
        quantity: 45,
        buying_price: 120,
        selling_price: 150,
        reorder_level: 10,
        created: (2023, 1, 15),
    },
    SeedProduct {
        name: "Sugar (1kg)",
        description: "Refined white sugar",
        category: "Food",
        sku: "SG-001",
        quantity: 32,
        buying_price: 130,
        selling_price: 160,
        reorder_level: 15,
        created: (2023, 1, 20),
    },
    SeedProduct {
        name: "Cooking Oil (5L)",
        description: "Vegetable cooking oil",
        category: "Food",
        sku: "CO-001",
        quantity: 18,
        buying_price: 850,
        selling_price: 950,
        reorder_level: 5,
        created: (2023, 2, 1),
    },
    SeedProduct {
        name: "Notebook (100 pages)",
        description: "Ruled notebook for students",
        category: "Stationery",
        sku: "ST-001",
        quantity: 120,
        buying_price: 50,
        selling_price: 80,
        reorder_level: 30,
        created: (2023, 2, 10),
    },
    SeedProduct {
        name: "Ballpoint Pens (box)",
        description: "Box of 12 blue ballpoint pens",
        category: "Stationery",
        sku: "ST-002",
        quantity: 25,
        buying_price: 120,
        selling_price: 200,
        reorder_level: 10,
        created: (2023, 2, 15),
    },
    SeedProduct {
        name: "Laundry Soap",
        description: "Multi-purpose laundry soap bar",
        category: "Household",
        sku: "HH-001",
        quantity: 80,
        buying_price: 35,
        selling_price: 50,
        reorder_level: 20,
        created: (2023, 2, 20),
    },
    SeedProduct {
        name: "Toilet Paper (6 rolls)",
        description: "Soft toilet paper pack",
        category: "Household",
        sku: "HH-002",
        quantity: 40,
        buying_price: 250,
        selling_price: 320,
        reorder_level: 15,
        created: (2023, 3, 1),
    },
    SeedProduct {
        name: "Bread",
        description: "Fresh sliced bread",
        category: "Food",
        sku: "FD-003",
        quantity: 5,
        buying_price: 45,
        selling_price: 55,
        reorder_level: 10,
        created: (2023, 3, 10),
    },
];

fn midnight_utc((year, month, day): (i32, u32, u32)) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

pub fn demo_categories() -> Vec<Category> {
    CATEGORIES
        .iter()
        .map(|(name, description)| {
            Category::create(CategoryId::new(), NewCategory::new(*name, *description))
        })
        .collect()
}

pub fn demo_products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|seed| {
            let fields = NewProduct {
                name: seed.name.to_string(),
                description: seed.description.to_string(),
                category: seed.category.to_string(),
                sku: seed.sku.to_string(),
                quantity: seed.quantity,
                buying_price: Money::from_major(seed.buying_price),
                selling_price: Money::from_major(seed.selling_price),
                reorder_level: seed.reorder_level,
                image_url: None,
            };
            Product::create(ProductId::new(), fields, midnight_utc(seed.created))
        })
        .collect()
}

impl InventoryStore {
    /// A store pre-filled with the demo catalog.
    pub fn with_demo_data() -> Self {
        Self::assemble(demo_products(), demo_categories())
    }
}
