// handlers/public/auth/mod.rs - Session endpoints
//
// Sign-up and sign-in both hand back a signed token, as an HTTP-only cookie
// and (for sign-in) in the body for use as a bearer token.
pub mod signin;  // POST /signin
pub mod signout; // POST /signout
pub mod signup;  // POST /signup
pub mod utils;

pub use signin::signin;
pub use signout::signout;
pub use signup::signup;
