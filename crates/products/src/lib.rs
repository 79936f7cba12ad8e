//! Catalog entities: products and the categories they are filed under.
//!
//! Pure data + validation rules. Identity assignment, timestamping and the
//! collections themselves belong to `stockroom-inventory`.

pub mod category;
pub mod product;
pub mod validation;

pub use category::{Category, NewCategory};
pub use product::{NewProduct, PLACEHOLDER_IMAGE_URL, Product, ProductPatch};
pub use validation::{FieldError, FieldErrors};
