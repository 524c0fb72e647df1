pub mod whoami; // GET /api/auth/me

pub use whoami::whoami_get;
