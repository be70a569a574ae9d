//! Dashboard route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::db::orders::OrderStats;
use crate::db::{OrderRepository, ProductRepository, UserRepository};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::catalog::Product;
use crate::state::AppState;

/// Stock level at or below which a product appears in the low-stock list.
const LOW_STOCK_THRESHOLD: i32 = 3;

/// Dashboard payload.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub orders: OrderStats,
    pub product_count: i64,
    pub user_count: i64,
    pub low_stock: Vec<Product>,
}

/// Counters and the low-stock list for the console landing page.
#[instrument(skip(state, _admin))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>> {
    let orders = OrderRepository::new(state.pool()).stats().await?;
    let products = ProductRepository::new(state.pool());
    let product_count = products.count().await?;
    let low_stock = products.low_stock(LOW_STOCK_THRESHOLD).await?;
    let user_count = UserRepository::new(state.pool()).count().await?;

    Ok(Json(DashboardResponse {
        orders,
        product_count,
        user_count,
        low_stock,
    }))
}
