// handlers/public/mod.rs - endpoints that need no session token

pub mod articles;
pub mod auth;
pub mod comments;
pub mod health;
pub mod products;
pub mod users;
