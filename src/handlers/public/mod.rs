// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition and liveness endpoints. Nothing here reads an AuthUser.
pub mod auth;
pub mod home;
