//! Account route handlers (order history).

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use apexdrive_core::OrderNumber;

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::order::Order;
use crate::state::AppState;

/// Order history for the signed-in user, newest first.
///
/// Orders are matched by the email they were placed with, so guest orders
/// placed with the same address show up after registration.
#[instrument(skip(state, user))]
pub async fn orders(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool())
        .list_for_email(user.email.as_str())
        .await?;

    Ok(Json(orders))
}

/// One order, only if it belongs to the signed-in user.
///
/// Foreign order numbers return 404 rather than 403 so the endpoint does
/// not confirm which numbers exist.
#[instrument(skip(state, user))]
pub async fn order_detail(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<Order>> {
    let order_number = OrderNumber::parse(&number)
        .ok_or_else(|| AppError::NotFound(format!("order {number}")))?;

    let order = OrderRepository::new(state.pool())
        .get(&order_number)
        .await?
        .filter(|order| order.customer_email.eq_ignore_ascii_case(user.email.as_str()))
        .ok_or_else(|| AppError::NotFound(format!("order {number}")))?;

    Ok(Json(order))
}
