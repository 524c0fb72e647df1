// handlers/public/auth/mod.rs - session acquisition, no token required

pub mod login;  // POST /api/auth/login
pub mod logout; // POST /api/auth/logout

pub use login::login_post;
pub use logout::logout_post;
