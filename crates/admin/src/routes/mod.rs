//! HTTP route handlers for the admin console API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                           - Liveness check
//! GET  /health/ready                     - Readiness check (pings the database)
//!
//! # Auth
//! POST /auth/login                       - Admin login (email/password + admin role)
//! POST /auth/logout                      - Logout
//! GET  /auth/me                          - Current admin session
//!
//! # Dashboard
//! GET  /dashboard                        - Counters: orders, revenue, products, accounts
//!
//! # Catalog
//! GET  /products                         - Product list (q/category/page)
//! POST /products                         - Create product
//! GET  /products/{id}                    - Product detail
//! PUT  /products/{id}                    - Replace product
//! DELETE /products/{id}                  - Delete product
//! GET  /categories                       - All categories (disabled included)
//! POST /categories                       - Create category
//! PUT  /categories/{id}                  - Replace category
//! DELETE /categories/{id}                - Delete category (409 while referenced)
//!
//! # Orders
//! GET  /orders                           - Order list (status/page)
//! GET  /orders/{number}                  - Order detail
//! PUT  /orders/{number}/status           - Set fulfilment status
//! PUT  /orders/{number}/payment-status   - Set payment status
//!
//! # Accounts
//! GET  /users                            - Account list (page)
//! PUT  /users/{id}/role                  - Set account role
//!
//! # Home-page content
//! GET/POST /content/hero-slides          - List / create hero slides
//! PUT/DELETE /content/hero-slides/{id}   - Update / delete one slide
//! GET/POST /content/highlights           - List / create highlight cards
//! PUT/DELETE /content/highlights/{id}    - Update / delete one card
//! GET/POST /content/category-tiles       - List / create category tiles
//! PUT/DELETE /content/category-tiles/{id} - Update / delete one tile
//! GET/PUT  /content/showcase             - Read / save showcase section
//! GET/PUT  /content/brand-story          - Read / save brand story
//! GET/PUT  /content/logo                 - Read / save branding settings
//!
//! # Uploads
//! POST /uploads                          - Multipart image upload, returns hosted URL
//! ```

pub mod auth;
pub mod categories;
pub mod content;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod uploads;
pub mod users;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};

use crate::services::images::UPLOAD_BODY_LIMIT;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
        .route("/categories", get(categories::list).post(categories::create))
        .route(
            "/categories/{id}",
            put(categories::update).delete(categories::delete),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list))
        .route("/{number}", get(orders::show))
        .route("/{number}/status", put(orders::set_status))
        .route("/{number}/payment-status", put(orders::set_payment_status))
}

/// Create the account routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list))
        .route("/{id}/role", put(users::set_role))
}

/// Create the home-page content routes router.
pub fn content_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/hero-slides",
            get(content::list_hero_slides).post(content::create_hero_slide),
        )
        .route(
            "/hero-slides/{id}",
            put(content::update_hero_slide).delete(content::delete_hero_slide),
        )
        .route(
            "/highlights",
            get(content::list_highlights).post(content::create_highlight),
        )
        .route(
            "/highlights/{id}",
            put(content::update_highlight).delete(content::delete_highlight),
        )
        .route(
            "/category-tiles",
            get(content::list_category_tiles).post(content::create_category_tile),
        )
        .route(
            "/category-tiles/{id}",
            put(content::update_category_tile).delete(content::delete_category_tile),
        )
        .route(
            "/showcase",
            get(content::get_showcase).put(content::save_showcase),
        )
        .route(
            "/brand-story",
            get(content::get_brand_story).put(content::save_brand_story),
        )
        .route("/logo", get(content::get_logo).put(content::save_logo))
}

/// Assemble all admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .route("/dashboard", get(dashboard::show))
        .merge(catalog_routes())
        .nest("/orders", order_routes())
        .nest("/users", user_routes())
        .nest("/content", content_routes())
        .route(
            "/uploads",
            // Uploads need more than axum's default 2 MB body limit.
            post(uploads::upload).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
}
