//! Read-only product queries.

use stockroom_products::Product;

/// Category restriction of a product query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// No restriction.
    #[default]
    All,
    /// Exact, case-sensitive match on the product's category name.
    Only(String),
}

impl CategoryFilter {
    /// Interpret a raw selector value.
    ///
    /// Both the unset value `""` and the explicit `"all"` selection mean
    /// [`CategoryFilter::All`].
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" | "all" => CategoryFilter::All,
            name => CategoryFilter::Only(name.to_string()),
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(name) => name == category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// A product query: search term AND category AND low-stock flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Lowercased search term; empty matches everything.
    needle: String,
    category: CategoryFilter,
    low_stock_only: bool,
}

impl ProductFilter {
    pub fn new(search: &str, category: impl Into<CategoryFilter>, low_stock_only: bool) -> Self {
        Self {
            needle: search.to_lowercase(),
            category: category.into(),
            low_stock_only,
        }
    }

    /// Matches every product.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: &str) -> Self {
        self.needle = term.to_lowercase();
        self
    }

    pub fn category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn low_stock_only(mut self, enabled: bool) -> Self {
        self.low_stock_only = enabled;
        self
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.matches_search(product)
            && self.category.matches(product.category())
            && (!self.low_stock_only || product.is_low_stock())
    }

    /// Matching products in collection order.
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }

    fn matches_search(&self, product: &Product) -> bool {
        self.needle.is_empty()
            || product.name().to_lowercase().contains(&self.needle)
            || product.sku().to_lowercase().contains(&self.needle)
    }
}
