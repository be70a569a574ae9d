//! Business-logic services for the storefront.

pub mod auth;
