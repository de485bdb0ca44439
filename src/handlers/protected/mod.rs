// handlers/protected/mod.rs - Handlers behind the bearer token gate
//
// Every handler here reads the AuthUser inserted by jwt_auth_middleware and
// scopes its work to that user.
pub mod notes;
pub mod profile;
