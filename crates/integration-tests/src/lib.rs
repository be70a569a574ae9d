//! Integration test helpers for Apex Drive.
//!
//! The tests in `tests/` drive the two services over HTTP and are marked
//! `#[ignore]` because they need running servers and a migrated database:
//!
//! ```bash
//! cargo run -p apexdrive-cli -- migrate
//! cargo run -p apexdrive-cli -- seed
//! cargo run -p apexdrive-storefront &
//! cargo run -p apexdrive-admin &
//! cargo test -p apexdrive-integration-tests -- --ignored
//! ```
//!
//! Admin tests additionally need an admin account, created via:
//!
//! ```bash
//! cargo run -p apexdrive-cli -- admin promote -e $ADMIN_TEST_EMAIL
//! ```
//!
//! and exported as `ADMIN_TEST_EMAIL` / `ADMIN_TEST_PASSWORD`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the storefront API (`STOREFRONT_BASE_URL`).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Base URL for the admin API (`ADMIN_BASE_URL`).
#[must_use]
pub fn admin_base_url() -> String {
    std::env::var("ADMIN_BASE_URL").unwrap_or_else(|_| "http://localhost:3001".to_string())
}

/// HTTP client with a cookie store, so session cookies survive across
/// requests the way a browser's would.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("failed to create HTTP client")
}

/// A unique throwaway email for account registration tests.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", Uuid::new_v4())
}

/// Admin credentials from the environment, or `None` to skip the test.
#[must_use]
pub fn admin_credentials() -> Option<(String, String)> {
    let email = std::env::var("ADMIN_TEST_EMAIL").ok()?;
    let password = std::env::var("ADMIN_TEST_PASSWORD").ok()?;
    Some((email, password))
}

/// Log in and return a client carrying the admin session cookie, or `None`
/// when no credentials are configured.
///
/// # Panics
///
/// Panics if the login request fails or the credentials are rejected.
pub async fn admin_client() -> Option<Client> {
    let (email, password) = admin_credentials()?;
    let base_url = admin_base_url();
    let client = client();

    let resp = client
        .post(format!("{base_url}/auth/login"))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("admin login request failed");
    assert_eq!(resp.status(), StatusCode::OK, "admin login rejected");

    Some(client)
}

/// A payload for creating throwaway test products.
#[must_use]
pub fn product_payload(name: &str, category: &str) -> Value {
    json!({
        "name": name,
        "description": "created by integration tests",
        "price": "49.90",
        "category": category,
        "images": ["/test/product.jpg"],
        "stock": 5,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_emails_differ() {
        assert_ne!(unique_email("cart"), unique_email("cart"));
    }

    #[test]
    fn unique_email_carries_prefix() {
        assert!(unique_email("checkout").starts_with("checkout-"));
    }
}
