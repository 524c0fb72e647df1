// handlers/mod.rs - two security tiers
//
// public:    no authentication (resources, signup, login/logout, health)
// protected: session token required (/api/auth/me)

pub mod protected;
pub mod public;
pub mod utils;
