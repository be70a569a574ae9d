//! Business logic services for the admin console.

pub mod auth;
pub mod images;
