//! Order models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use apexdrive_core::{OrderNumber, OrderStatus, PaymentMethod, PaymentStatus, ProductId};

/// A line item snapshot embedded in an order.
///
/// Copied from the cart at checkout time. Deliberately not a reference into
/// the product table: later product edits or deletes must not change what
/// the customer bought.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub image: Option<String>,
    pub quantity: u32,
}

impl OrderItem {
    /// Line total for this item.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A placed order.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_multiplies() {
        let item = OrderItem {
            product_id: ProductId::new(9),
            name: "Floor mat set".to_string(),
            unit_price: Decimal::new(4550, 2),
            image: None,
            quantity: 3,
        };
        assert_eq!(item.line_total(), Decimal::new(13650, 2));
    }

    #[test]
    fn order_item_serde_round_trip() {
        let item = OrderItem {
            product_id: ProductId::new(4),
            name: "Roof rack".to_string(),
            unit_price: Decimal::new(19900, 2),
            image: Some("https://img.test/rack.jpg".to_string()),
            quantity: 1,
        };
        let json = serde_json::to_string(&item).expect("serialize");
        let back: OrderItem = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, item);
    }
}
