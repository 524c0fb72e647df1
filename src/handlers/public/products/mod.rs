// handlers/public/products/mod.rs - /api/products

pub mod collection; // GET, POST /api/products
pub mod record;     // GET, PATCH, DELETE /api/products/:id

pub use collection::{products_get, products_post};
pub use record::{product_delete, product_get, product_patch};

use crate::handlers::utils::FieldValidator;

/// Tags are trimmed; blank tags are rejected
fn clean_tags(v: &mut FieldValidator, tags: Option<Vec<String>>) -> Option<Vec<String>> {
    let tags: Vec<String> = tags?.into_iter().map(|t| t.trim().to_string()).collect();
    v.check(tags.iter().all(|t| !t.is_empty()), "tags", "Tags must not be empty");
    Some(tags)
}
