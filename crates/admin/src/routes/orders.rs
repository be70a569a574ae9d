//! Order management route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use apexdrive_core::{OrderNumber, OrderStatus, PaymentStatus};

use crate::db::OrderRepository;
use crate::error::{AdminError, Result};
use crate::middleware::RequireAdmin;
use crate::models::order::Order;
use crate::state::AppState;

const DEFAULT_PER_PAGE: i64 = 25;
const MAX_PER_PAGE: i64 = 100;

/// Query parameters for the order list.
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    /// Fulfilment status filter.
    pub status: Option<OrderStatus>,
    /// 1-based page number.
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Order list payload.
#[derive(Debug, Serialize)]
pub struct OrderListResponse {
    pub orders: Vec<Order>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// Status update request body.
#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: OrderStatus,
}

/// Payment status update request body.
#[derive(Debug, Deserialize)]
pub struct PaymentStatusRequest {
    pub payment_status: PaymentStatus,
}

fn parse_number(number: &str) -> Result<OrderNumber> {
    OrderNumber::parse(number).ok_or_else(|| AdminError::NotFound(format!("order {number}")))
}

/// Paginated order list, newest first, optionally filtered by status.
#[instrument(skip(state, _admin))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> Result<Json<OrderListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);
    let offset = (page - 1) * per_page;

    let result = OrderRepository::new(state.pool())
        .list(query.status, per_page, offset)
        .await?;

    Ok(Json(OrderListResponse {
        orders: result.orders,
        total: result.total,
        page,
        per_page,
    }))
}

/// One order by number.
#[instrument(skip(state, _admin))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<Order>> {
    let order_number = parse_number(&number)?;
    let order = OrderRepository::new(state.pool())
        .get(&order_number)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("order {number}")))?;

    Ok(Json(order))
}

/// Set an order's fulfilment status.
#[instrument(skip(state, _admin), fields(status = %request.status))]
pub async fn set_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(number): Path<String>,
    Json(request): Json<StatusRequest>,
) -> Result<Json<Order>> {
    let order_number = parse_number(&number)?;
    let order = OrderRepository::new(state.pool())
        .set_status(&order_number, request.status)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("order {number}")))?;

    tracing::info!(order_number = %order.order_number, status = %order.status, "order status updated");
    Ok(Json(order))
}

/// Set an order's payment status.
#[instrument(skip(state, _admin), fields(payment_status = %request.payment_status))]
pub async fn set_payment_status(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(number): Path<String>,
    Json(request): Json<PaymentStatusRequest>,
) -> Result<Json<Order>> {
    let order_number = parse_number(&number)?;
    let order = OrderRepository::new(state.pool())
        .set_payment_status(&order_number, request.payment_status)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("order {number}")))?;

    tracing::info!(
        order_number = %order.order_number,
        payment_status = %order.payment_status,
        "order payment status updated"
    );
    Ok(Json(order))
}
