//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (pings the database)
//!
//! # Catalog
//! GET  /catalog/products           - Product listing (category/q/sort/page)
//! GET  /catalog/products/featured  - Featured products
//! GET  /catalog/products/new       - New arrivals
//! GET  /catalog/products/{id}      - Product detail
//! GET  /catalog/categories         - Enabled categories
//!
//! # Content
//! GET  /content/home               - Home-page content payload (cached)
//!
//! # Cart (session-held)
//! GET  /cart                       - Current cart
//! POST /cart/items                 - Add item
//! POST /cart/items/update          - Set line quantity (0 removes)
//! POST /cart/items/remove          - Remove line
//! POST /cart/clear                 - Empty the cart
//! GET  /cart/count                 - Item count badge
//!
//! # Checkout
//! POST /checkout                   - Validate, pay, place order
//! POST /checkout/{number}/confirm  - Poll the gateway and record the payment outcome
//!
//! # Auth
//! POST /auth/register              - Create account
//! POST /auth/login                 - Login
//! POST /auth/logout                - Logout
//! GET  /auth/me                    - Current session user
//!
//! # Account (requires auth)
//! GET  /account/orders             - Order history
//! GET  /account/orders/{number}    - Order detail (own orders only)
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod content;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{auth_rate_limiter, checkout_rate_limiter};
use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(catalog::list))
        .route("/products/featured", get(catalog::featured))
        .route("/products/new", get(catalog::new_arrivals))
        .route("/products/{id}", get(catalog::show))
        .route("/categories", get(catalog::categories))
}

/// Create the content routes router.
pub fn content_routes() -> Router<AppState> {
    Router::new().route("/home", get(content::home))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add))
        .route("/items/update", post(cart::update))
        .route("/items/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the checkout router (rate limited).
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::place_order))
        .route("/{number}/confirm", post(checkout::confirm_payment))
        .layer(checkout_rate_limiter())
}

/// Create the auth routes router (rate limited).
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
        .layer(auth_rate_limiter())
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(account::orders))
        .route("/orders/{number}", get(account::order_detail))
}

/// Assemble all storefront routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/catalog", catalog_routes())
        .nest("/content", content_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .nest("/auth", auth_routes())
        .nest("/account", account_routes())
}
