//! Order models as seen from the admin console.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use apexdrive_core::{OrderNumber, OrderStatus, PaymentMethod, PaymentStatus, ProductId};

/// A line item snapshot stored inside an order.
///
/// Matches the JSONB shape written at checkout; product edits after the
/// sale never change these rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub image: Option<String>,
    pub quantity: u32,
}

/// A placed order with full customer and payment detail.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub order_number: OrderNumber,
    pub items: Vec<OrderItem>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub address_line: String,
    pub city: String,
    pub postal_code: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_reference: Option<String>,
    pub status: OrderStatus,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
