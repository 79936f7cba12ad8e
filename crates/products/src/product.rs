use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{Entity, Money, ProductId};

use crate::validation::FieldErrors;

/// Image reference used when a product is created without one.
pub const PLACEHOLDER_IMAGE_URL: &str = "/placeholder.svg";

/// A stocked product.
///
/// `category` is the category *name*, not a reference to a `Category` entity;
/// a product may name a category that does not (or no longer) exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    description: String,
    category: String,
    sku: String,
    quantity: i64,
    buying_price: Money,
    selling_price: Money,
    reorder_level: i64,
    image_url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Product {
    /// Materialize a new product; `created_at == updated_at == at`.
    ///
    /// Does not validate. Callers go through `NewProduct::validate` first.
    pub fn create(id: ProductId, fields: NewProduct, at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            description: fields.description,
            category: fields.category,
            sku: fields.sku,
            quantity: fields.quantity,
            buying_price: fields.buying_price,
            selling_price: fields.selling_price,
            reorder_level: fields.reorder_level,
            image_url: fields
                .image_url
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string()),
            created_at: at,
            updated_at: at,
        }
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn buying_price(&self) -> Money {
        self.buying_price
    }

    pub fn selling_price(&self) -> Money {
        self.selling_price
    }

    pub fn reorder_level(&self) -> i64 {
        self.reorder_level
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// At or below the reorder level (the threshold is inclusive).
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.reorder_level
    }

    /// Stock valued at cost: quantity × buying price.
    pub fn stock_value(&self) -> Money {
        self.buying_price.times(self.quantity)
    }

    /// Stock valued at selling price: quantity × selling price.
    pub fn retail_value(&self) -> Money {
        self.selling_price.times(self.quantity)
    }

    /// Check a product built outside the store (e.g. deserialized) against the
    /// same rules every write path enforces, plus `updated_at >= created_at`.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(self.name.trim().is_empty(), "name", "Product name is required");
        errors.check(self.category.is_empty(), "category", "Category is required");
        errors.check(self.sku.trim().is_empty(), "sku", "SKU is required");
        check_amounts(
            &mut errors,
            Some(self.quantity),
            Some(self.buying_price),
            Some(self.selling_price),
            Some(self.reorder_level),
        );
        errors.check(
            self.updated_at < self.created_at,
            "updated_at",
            "Last update cannot precede creation",
        );
        errors.into_result()
    }

    /// Merge every present field of `patch`; `id` and `created_at` never change.
    pub fn apply_patch(&mut self, patch: ProductPatch, at: DateTime<Utc>) {
        let ProductPatch {
            name,
            description,
            category,
            sku,
            quantity,
            buying_price,
            selling_price,
            reorder_level,
            image_url,
        } = patch;

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = category {
            self.category = v;
        }
        if let Some(v) = sku {
            self.sku = v;
        }
        if let Some(v) = quantity {
            self.quantity = v;
        }
        if let Some(v) = buying_price {
            self.buying_price = v;
        }
        if let Some(v) = selling_price {
            self.selling_price = v;
        }
        if let Some(v) = reorder_level {
            self.reorder_level = v;
        }
        if let Some(v) = image_url {
            self.image_url = v;
        }

        self.touch(at);
    }

    /// Overwrite the on-hand quantity (restock / stock count).
    pub fn set_quantity(&mut self, quantity: i64, at: DateTime<Utc>) {
        self.quantity = quantity;
        self.touch(at);
    }

    // A clock running behind creation time must not break updated_at >= created_at.
    fn touch(&mut self, at: DateTime<Utc>) {
        self.updated_at = at.max(self.created_at);
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Input for creating a product: every field except identity and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub category: String,
    pub sku: String,
    pub quantity: i64,
    pub buying_price: Money,
    pub selling_price: Money,
    pub reorder_level: i64,
    /// `None` falls back to [`PLACEHOLDER_IMAGE_URL`].
    pub image_url: Option<String>,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.check(self.name.trim().is_empty(), "name", "Product name is required");
        errors.check(self.category.is_empty(), "category", "Category is required");
        errors.check(self.sku.trim().is_empty(), "sku", "SKU is required");
        check_amounts(
            &mut errors,
            Some(self.quantity),
            Some(self.buying_price),
            Some(self.selling_price),
            Some(self.reorder_level),
        );
        errors.into_result()
    }
}

/// Partial update of a product. `None` leaves a field as it is.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub sku: Option<String>,
    pub quantity: Option<i64>,
    pub buying_price: Option<Money>,
    pub selling_price: Option<Money>,
    pub reorder_level: Option<i64>,
    pub image_url: Option<String>,
}

impl ProductPatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch that overwrites every editable field, as a full edit form submits.
    pub fn replace_with(fields: NewProduct) -> Self {
        Self {
            name: Some(fields.name),
            description: Some(fields.description),
            category: Some(fields.category),
            sku: Some(fields.sku),
            quantity: Some(fields.quantity),
            buying_price: Some(fields.buying_price),
            selling_price: Some(fields.selling_price),
            reorder_level: Some(fields.reorder_level),
            image_url: fields.image_url,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn buying_price(mut self, price: Money) -> Self {
        self.buying_price = Some(price);
        self
    }

    pub fn selling_price(mut self, price: Money) -> Self {
        self.selling_price = Some(price);
        self
    }

    pub fn reorder_level(mut self, level: i64) -> Self {
        self.reorder_level = Some(level);
        self
    }

    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Validates only the fields being changed.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());

        let mut errors = FieldErrors::new();
        errors.check(blank(&self.name), "name", "Product name is required");
        errors.check(
            self.category.as_deref().is_some_and(str::is_empty),
            "category",
            "Category is required",
        );
        errors.check(blank(&self.sku), "sku", "SKU is required");
        check_amounts(
            &mut errors,
            self.quantity,
            self.buying_price,
            self.selling_price,
            self.reorder_level,
        );
        errors.into_result()
    }
}

fn check_amounts(
    errors: &mut FieldErrors,
    quantity: Option<i64>,
    buying_price: Option<Money>,
    selling_price: Option<Money>,
    reorder_level: Option<i64>,
) {
    errors.check(
        quantity.is_some_and(|q| q < 0),
        "quantity",
        "Quantity cannot be negative",
    );
    errors.check(
        buying_price.is_some_and(Money::is_negative),
        "buying_price",
        "Buying price cannot be negative",
    );
    errors.check(
        selling_price.is_some_and(Money::is_negative),
        "selling_price",
        "Selling price cannot be negative",
    );
    errors.check(
        reorder_level.is_some_and(|r| r < 0),
        "reorder_level",
        "Reorder level cannot be negative",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn test_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, 15, 0, 0, 0).unwrap()
    }

    fn maize_flour() -> NewProduct {
        NewProduct {
            name: "Maize Flour (2kg)".to_string(),
            description: "Premium maize flour for ugali".to_string(),
            category: "Food".to_string(),
            sku: "FL-001".to_string(),
            quantity: 45,
            buying_price: Money::from_major(120),
            selling_price: Money::from_major(150),
            reorder_level: 10,
            image_url: None,
        }
    }

    #[test]
    fn create_sets_both_timestamps_and_placeholder_image() {
        let product = Product::create(ProductId::new(), maize_flour(), test_time());

        assert_eq!(product.created_at(), test_time());
        assert_eq!(product.updated_at(), test_time());
        assert_eq!(product.image_url(), PLACEHOLDER_IMAGE_URL);
        assert_eq!(product.stock_value(), Money::from_major(45 * 120));
        assert_eq!(product.retail_value(), Money::from_major(45 * 150));
    }

    #[test]
    fn low_stock_threshold_is_inclusive() {
        let mut fields = maize_flour();
        fields.quantity = 10;
        fields.reorder_level = 10;
        let mut product = Product::create(ProductId::new(), fields, test_time());
        assert!(product.is_low_stock());

        product.set_quantity(11, test_time());
        assert!(!product.is_low_stock());
    }

    #[test]
    fn apply_patch_only_touches_present_fields() {
        let id = ProductId::new();
        let mut product = Product::create(id, maize_flour(), test_time());
        let later = test_time() + Duration::days(3);

        product.apply_patch(
            ProductPatch::new().name("Maize Flour (1kg)").quantity(12),
            later,
        );

        assert_eq!(product.id_typed(), id);
        assert_eq!(product.name(), "Maize Flour (1kg)");
        assert_eq!(product.quantity(), 12);
        assert_eq!(product.sku(), "FL-001");
        assert_eq!(product.buying_price(), Money::from_major(120));
        assert_eq!(product.created_at(), test_time());
        assert_eq!(product.updated_at(), later);
    }

    #[test]
    fn product_validation_checks_fields_and_timestamps() {
        let product = Product::create(ProductId::new(), maize_flour(), test_time());
        assert!(product.validate().is_ok());

        let mut fields = maize_flour();
        fields.quantity = -5;
        let negative = Product::create(ProductId::new(), fields, test_time());
        let errors = negative.validate().unwrap_err();
        assert_eq!(errors.get("quantity"), Some("Quantity cannot be negative"));

        let mut json = serde_json::to_value(&product).unwrap();
        json["updated_at"] = serde_json::to_value(test_time() - Duration::days(1)).unwrap();
        let backdated: Product = serde_json::from_value(json).unwrap();
        let errors = backdated.validate().unwrap_err();
        assert_eq!(errors.get("updated_at"), Some("Last update cannot precede creation"));
    }

    #[test]
    fn updated_at_never_precedes_created_at() {
        let mut product = Product::create(ProductId::new(), maize_flour(), test_time());
        product.set_quantity(3, test_time() - Duration::hours(1));
        assert_eq!(product.updated_at(), product.created_at());
    }

    #[test]
    fn new_product_validation_reports_every_field() {
        let fields = NewProduct {
            quantity: -1,
            buying_price: Money::from_minor(-1),
            selling_price: Money::from_minor(-1),
            reorder_level: -1,
            ..NewProduct::default()
        };

        let errors = fields.validate().unwrap_err();
        assert_eq!(errors.get("name"), Some("Product name is required"));
        assert_eq!(errors.get("category"), Some("Category is required"));
        assert_eq!(errors.get("sku"), Some("SKU is required"));
        assert_eq!(errors.get("quantity"), Some("Quantity cannot be negative"));
        assert_eq!(errors.get("buying_price"), Some("Buying price cannot be negative"));
        assert_eq!(errors.get("selling_price"), Some("Selling price cannot be negative"));
        assert_eq!(errors.get("reorder_level"), Some("Reorder level cannot be negative"));
        assert_eq!(errors.iter().count(), 7);
    }

    #[test]
    fn whitespace_only_name_is_rejected() {
        let mut fields = maize_flour();
        fields.name = "   ".to_string();
        let errors = fields.validate().unwrap_err();
        assert_eq!(errors.to_string(), "Product name is required");
    }

    #[test]
    fn valid_new_product_passes() {
        assert!(maize_flour().validate().is_ok());
    }

    #[test]
    fn patch_validation_ignores_absent_fields() {
        assert!(ProductPatch::new().validate().is_ok());
        assert!(ProductPatch::new().quantity(0).validate().is_ok());

        let errors = ProductPatch::new().sku(" ").quantity(-4).validate().unwrap_err();
        assert_eq!(errors.to_string(), "SKU is required; Quantity cannot be negative");
    }

    #[test]
    fn replace_with_keeps_image_when_not_given() {
        let mut product = Product::create(ProductId::new(), maize_flour(), test_time());
        product.apply_patch(ProductPatch::new().image_url("/img/flour.png"), test_time());

        product.apply_patch(ProductPatch::replace_with(maize_flour()), test_time());
        assert_eq!(product.image_url(), "/img/flour.png");
    }

    #[test]
    fn serializes_with_snake_case_fields() {
        let product = Product::create(ProductId::new(), maize_flour(), test_time());
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["sku"], "FL-001");
        assert_eq!(json["buying_price"], 12000);
        assert_eq!(json["reorder_level"], 10);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: any non-negative input with non-blank required fields validates.
            #[test]
            fn non_negative_inputs_validate(
                name in "[A-Za-z][A-Za-z0-9 ]{0,40}",
                sku in "[A-Z]{2}-[0-9]{3}",
                quantity in 0i64..1_000_000,
                reorder_level in 0i64..1_000_000,
                buying in 0i128..10_000_000,
                selling in 0i128..10_000_000,
            ) {
                let fields = NewProduct {
                    name,
                    category: "Food".to_string(),
                    sku,
                    quantity,
                    reorder_level,
                    buying_price: Money::from_minor(buying),
                    selling_price: Money::from_minor(selling),
                    ..NewProduct::default()
                };
                prop_assert!(fields.validate().is_ok());
            }

            /// Property: a patch never changes id or created_at, and updated_at >= created_at.
            #[test]
            fn patch_preserves_identity(
                quantity in 0i64..10_000,
                offset_secs in -86_400i64..86_400,
            ) {
                let id = ProductId::new();
                let mut product = Product::create(id, maize_flour(), test_time());
                product.apply_patch(
                    ProductPatch::new().quantity(quantity),
                    test_time() + Duration::seconds(offset_secs),
                );

                prop_assert_eq!(product.id_typed(), id);
                prop_assert_eq!(product.created_at(), test_time());
                prop_assert!(product.updated_at() >= product.created_at());
                prop_assert_eq!(product.quantity(), quantity);
            }
        }
    }
}
