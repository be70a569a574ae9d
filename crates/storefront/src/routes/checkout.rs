//! Checkout route handler.
//!
//! The client submits the whole multi-step form as one payload. The flow is
//! a sequence of remote calls: validate the form, re-check stock, create a
//! payment session for card orders, insert the order with the cart snapshot
//! (decrementing stock in the same transaction), then clear the cart.

use axum::{
    Json,
    extract::{Path, State},
};
use tower_sessions::Session;
use tracing::instrument;

use apexdrive_core::{CurrencyCode, Email, OrderNumber, PaymentMethod, PaymentStatus, Price};

use crate::db::orders::NewOrder;
use crate::db::{CatalogRepository, OrderRepository};
use crate::error::{AppError, Result};
use crate::models::cart::Cart;
use crate::routes::cart::{load_cart, save_cart};
use crate::state::AppState;
use serde::{Deserialize, Serialize};

/// Checkout form payload.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address_line: String,
    pub city: String,
    pub postal_code: String,
    pub payment_method: PaymentMethod,
}

/// Checkout result.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order_number: OrderNumber,
    pub payment_status: PaymentStatus,
    /// Hosted checkout page for card payments; absent for cash on delivery.
    pub redirect_url: Option<String>,
}

/// Validate the checkout form.
///
/// Returns the parsed email on success.
fn validate(request: &CheckoutRequest) -> Result<Email> {
    let required = [
        ("name", &request.name),
        ("phone", &request.phone),
        ("address_line", &request.address_line),
        ("city", &request.city),
        ("postal_code", &request.postal_code),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(AppError::BadRequest(format!("{field} is required")));
        }
    }

    let email = Email::parse(request.email.trim())
        .map_err(|e| AppError::BadRequest(format!("invalid email: {e}")))?;

    validate_phone(&request.phone)?;

    Ok(email)
}

/// Phone numbers must have 10-15 digits once separators are stripped.
fn validate_phone(phone: &str) -> Result<()> {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    let only_valid_chars = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+' | '.'));

    if !only_valid_chars || !(10..=15).contains(&digits) {
        return Err(AppError::BadRequest(
            "phone must contain 10-15 digits".to_string(),
        ));
    }
    Ok(())
}

/// Re-check that every cart line still refers to a live product with
/// enough stock. The insert transaction re-checks stock; this pass exists
/// to give the customer a precise error before any payment is created.
async fn verify_cart(state: &AppState, cart: &Cart) -> Result<()> {
    let catalog = CatalogRepository::new(state.pool());

    for line in &cart.items {
        let product = catalog.get(line.product_id).await?.ok_or_else(|| {
            AppError::Conflict(format!("{} is no longer available", line.name))
        })?;

        let available = u32::try_from(product.stock).unwrap_or(0);
        if available < line.quantity {
            return Err(AppError::Conflict(format!(
                "insufficient stock for {}",
                product.name
            )));
        }
    }

    Ok(())
}

/// Place an order from the session cart.
#[instrument(skip(state, session, request), fields(payment_method = %request.payment_method))]
pub async fn place_order(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let email = validate(&request)?;
    verify_cart(&state, &cart).await?;

    let subtotal = cart.subtotal();
    let total = subtotal; // shipping is free; taxes are included in prices
    let order_number = OrderNumber::generate();

    // Card orders get a hosted-checkout session before the order is written,
    // so a gateway failure leaves no dangling order behind.
    let (payment_status, payment_reference, redirect_url) = match request.payment_method {
        PaymentMethod::Card => {
            let return_url = format!(
                "{}/checkout/complete?order={}",
                state.config().web_origin,
                order_number
            );
            let payment = state
                .gateway()
                .create_payment(
                    Price::new(total, CurrencyCode::default()),
                    &order_number,
                    &return_url,
                )
                .await?;
            (
                PaymentStatus::Pending,
                Some(payment.id),
                Some(payment.redirect_url),
            )
        }
        PaymentMethod::CashOnDelivery => (PaymentStatus::Pending, None, None),
    };

    let order = OrderRepository::new(state.pool())
        .create(NewOrder {
            order_number,
            items: cart.to_order_items(),
            customer_name: request.name.trim().to_string(),
            customer_email: email.into_inner(),
            customer_phone: request.phone.trim().to_string(),
            address_line: request.address_line.trim().to_string(),
            city: request.city.trim().to_string(),
            postal_code: request.postal_code.trim().to_string(),
            payment_method: request.payment_method,
            payment_status,
            payment_reference,
            subtotal,
            total,
        })
        .await?;

    // Cart is spent; failures here must not fail the placed order
    let mut cart = cart;
    cart.clear();
    if let Err(e) = save_cart(&session, &cart).await {
        tracing::warn!("failed to clear cart after checkout: {e}");
    }

    tracing::info!(order_number = %order.order_number, "order placed");

    Ok(Json(CheckoutResponse {
        order_number: order.order_number,
        payment_status: order.payment_status,
        redirect_url,
    }))
}

/// Payment confirmation payload.
#[derive(Debug, Serialize)]
pub struct PaymentConfirmation {
    pub order_number: OrderNumber,
    pub payment_status: PaymentStatus,
}

/// Poll the gateway for a card order's payment outcome and record it.
///
/// The customer lands back on the site after the hosted checkout page;
/// the client calls this to learn whether the payment went through. Cash
/// orders and orders already settled return their stored status without
/// a gateway call.
#[instrument(skip(state))]
pub async fn confirm_payment(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<PaymentConfirmation>> {
    let order_number = OrderNumber::parse(&number)
        .ok_or_else(|| AppError::NotFound(format!("no order {number}")))?;

    let orders = OrderRepository::new(state.pool());
    let order = orders
        .get(&order_number)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("no order {number}")))?;

    let Some(reference) = order
        .payment_reference
        .clone()
        .filter(|_| order.payment_status == PaymentStatus::Pending)
    else {
        return Ok(Json(PaymentConfirmation {
            order_number: order.order_number,
            payment_status: order.payment_status,
        }));
    };

    let reported = PaymentStatus::from(state.gateway().payment_status(&reference).await?);
    let order = if reported == order.payment_status {
        order
    } else {
        tracing::info!(order_number = %order_number, status = %reported, "payment status updated");
        orders
            .set_payment_status(&order_number, reported)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("no order {number}")))?
    };

    Ok(Json(PaymentConfirmation {
        order_number: order.order_number,
        payment_status: order.payment_status,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            name: "Dana Driver".to_string(),
            email: "dana@example.com".to_string(),
            phone: "+1 (555) 010-2030".to_string(),
            address_line: "1 Pit Lane".to_string(),
            city: "Speedville".to_string(),
            postal_code: "90210".to_string(),
            payment_method: PaymentMethod::CashOnDelivery,
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(validate(&request()).is_ok());
    }

    #[test]
    fn blank_required_field_fails() {
        let mut r = request();
        r.city = "   ".to_string();
        assert!(matches!(validate(&r), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn bad_email_fails() {
        let mut r = request();
        r.email = "not-an-email".to_string();
        assert!(matches!(validate(&r), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn phone_accepts_separators() {
        assert!(validate_phone("+90 (532) 123-45-67").is_ok());
        assert!(validate_phone("5550102030").is_ok());
    }

    #[test]
    fn phone_rejects_short_and_garbage() {
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("call me maybe").is_err());
        assert!(validate_phone("5550102030x99999999").is_err());
    }
}
