//! Domain models for the admin console.

pub mod catalog;
pub mod content;
pub mod order;
pub mod session;
pub mod user;

pub use session::{CurrentAdmin, session_keys};
