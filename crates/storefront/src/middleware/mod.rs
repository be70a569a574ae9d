//! Middleware for the storefront.

pub mod auth;
pub mod rate_limit;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth};
pub use rate_limit::{auth_rate_limiter, checkout_rate_limiter};
pub use session::create_session_layer;
