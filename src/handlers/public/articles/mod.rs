// handlers/public/articles/mod.rs - /api/articles

pub mod collection; // GET, POST /api/articles
pub mod record;     // GET, PATCH, DELETE /api/articles/:articleId

pub use collection::{articles_get, articles_post};
pub use record::{article_delete, article_get, article_patch};
