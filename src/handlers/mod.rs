// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer token required)
pub mod public;    // Home page, health probe, sign-up/sign-in/sign-out
pub mod protected; // Notes CRUD and the caller's profile
