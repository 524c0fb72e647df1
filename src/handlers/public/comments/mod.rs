// handlers/public/comments/mod.rs - /api/articles/:articleId/comments

pub mod collection; // GET, POST
pub mod record;     // PATCH, DELETE .../:commentId

pub use collection::{comments_get, comments_post};
pub use record::{comment_delete, comment_patch};
