// handlers/public/users/mod.rs - /api/users

pub mod collection; // POST /api/users (signup)
pub mod record;     // GET, PATCH, DELETE /api/users/:userId

pub use collection::users_post;
pub use record::{user_delete, user_get, user_patch};
