//! Cart route handlers.
//!
//! The cart lives in the server session; these handlers read it, mutate it,
//! and write it back. Nothing touches the order tables until checkout.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use apexdrive_core::ProductId;

use crate::db::CatalogRepository;
use crate::error::{AppError, Result};
use crate::models::cart::{Cart, CartItem};
use crate::models::session::keys;
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Read the cart from the session, defaulting to empty.
pub(crate) async fn load_cart(session: &Session) -> Result<Cart> {
    let cart = session
        .get::<Cart>(keys::CART)
        .await
        .map_err(|e| AppError::Internal(format!("session read failed: {e}")))?
        .unwrap_or_default();
    Ok(cart)
}

/// Write the cart back to the session.
pub(crate) async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session
        .insert(keys::CART, cart)
        .await
        .map_err(|e| AppError::Internal(format!("session write failed: {e}")))
}

// =============================================================================
// Request / Response Types
// =============================================================================

/// Add-to-cart request body.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: i32,
    pub quantity: Option<u32>,
}

/// Update-quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub product_id: i32,
    pub quantity: u32,
}

/// Remove-line request body.
#[derive(Debug, Deserialize)]
pub struct RemoveItemRequest {
    pub product_id: i32,
}

/// Cart payload returned by all cart handlers.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub item_count: u32,
    pub subtotal: Decimal,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
            items: cart.items,
        }
    }
}

/// Count badge payload.
#[derive(Debug, Serialize)]
pub struct CartCountResponse {
    pub count: u32,
}

// =============================================================================
// Handlers
// =============================================================================

/// Current cart contents.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<Json<CartResponse>> {
    let cart = load_cart(&session).await?;
    Ok(Json(cart.into()))
}

/// Add a product to the cart.
///
/// Looks the product up so the line snapshots the current price and cover
/// image; quantity is clamped to available stock.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<CartResponse>> {
    let quantity = request.quantity.unwrap_or(1).max(1);

    let product = CatalogRepository::new(state.pool())
        .get(ProductId::new(request.product_id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.product_id)))?;

    if !product.in_stock() {
        return Err(AppError::Conflict(format!("{} is out of stock", product.name)));
    }

    let mut cart = load_cart(&session).await?;
    let stock = u32::try_from(product.stock).unwrap_or(0);
    cart.add(&product, quantity, stock);
    save_cart(&session, &cart).await?;

    Ok(Json(cart.into()))
}

/// Set a line's quantity; zero removes the line.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<CartResponse>> {
    let mut cart = load_cart(&session).await?;

    if !cart.set_quantity(ProductId::new(request.product_id), request.quantity) {
        return Err(AppError::NotFound(format!(
            "product {} is not in the cart",
            request.product_id
        )));
    }

    save_cart(&session, &cart).await?;
    Ok(Json(cart.into()))
}

/// Remove a line from the cart.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(request): Json<RemoveItemRequest>,
) -> Result<Json<CartResponse>> {
    let mut cart = load_cart(&session).await?;

    if !cart.remove(ProductId::new(request.product_id)) {
        return Err(AppError::NotFound(format!(
            "product {} is not in the cart",
            request.product_id
        )));
    }

    save_cart(&session, &cart).await?;
    Ok(Json(cart.into()))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Json<CartResponse>> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;
    Ok(Json(cart.into()))
}

/// Item count for the header badge.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Result<Json<CartCountResponse>> {
    let cart = load_cart(&session).await?;
    Ok(Json(CartCountResponse {
        count: cart.item_count(),
    }))
}
