// handlers/protected/mod.rs - routes behind jwt_auth_middleware

pub mod auth;
