//! Session-held shopping cart.
//!
//! The cart lives entirely in the server session until checkout; nothing is
//! written to the database for an abandoned cart. Prices and images are
//! snapshotted at add time, which is also what the order embeds later.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use apexdrive_core::ProductId;

use super::catalog::Product;
use super::order::OrderItem;

/// Maximum quantity of a single product per cart.
pub const MAX_LINE_QUANTITY: u32 = 99;

/// One cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Decimal,
    pub image: Option<String>,
    pub quantity: u32,
}

impl CartItem {
    /// Snapshot a product into a cart line.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.effective_price(),
            image: product.cover_image().map(ToOwned::to_owned),
            quantity,
        }
    }

    /// Line total for this item.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The cart stored in the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Add a product, merging quantity into an existing line for the same
    /// product. The quantity is clamped to `available_stock` and to
    /// [`MAX_LINE_QUANTITY`]. Returns the resulting line quantity.
    pub fn add(&mut self, product: &Product, quantity: u32, available_stock: u32) -> u32 {
        let cap = available_stock.min(MAX_LINE_QUANTITY);

        if let Some(line) = self
            .items
            .iter_mut()
            .find(|line| line.product_id == product.id)
        {
            line.quantity = line.quantity.saturating_add(quantity).min(cap);
            // Refresh the snapshot so a price change shows up when the
            // customer adds the same product again
            line.unit_price = product.effective_price();
            line.image = product.cover_image().map(ToOwned::to_owned);
            return line.quantity;
        }

        let line = CartItem::from_product(product, quantity.clamp(1, cap.max(1)));
        let result = line.quantity;
        self.items.push(line);
        result
    }

    /// Set a line's quantity; zero removes the line. Returns false if no
    /// line for the product exists.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove(product_id);
        }
        match self
            .items
            .iter_mut()
            .find(|line| line.product_id == product_id)
        {
            Some(line) => {
                line.quantity = quantity.min(MAX_LINE_QUANTITY);
                true
            }
            None => false,
        }
    }

    /// Remove a line. Returns false if no line for the product exists.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|line| line.product_id != product_id);
        self.items.len() != before
    }

    /// Drop all lines.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Convert the cart into order line snapshots.
    #[must_use]
    pub fn to_order_items(&self) -> Vec<OrderItem> {
        self.items
            .iter()
            .map(|line| OrderItem {
                product_id: line.product_id,
                name: line.name.clone(),
                unit_price: line.unit_price,
                image: line.image.clone(),
                quantity: line.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: i32, price: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Decimal::new(price, 2),
            discount_price: None,
            category: "Interior".to_string(),
            vehicle_model: None,
            images: vec![format!("https://img.test/{id}.jpg")],
            stock: 10,
            is_new: false,
            is_featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn add_merges_same_product() {
        let mut cart = Cart::default();
        let p = product(1, 1000);
        cart.add(&p, 2, 10);
        cart.add(&p, 3, 10);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn add_clamps_to_stock() {
        let mut cart = Cart::default();
        let p = product(1, 1000);
        let qty = cart.add(&p, 5, 3);
        assert_eq!(qty, 3);
        let qty = cart.add(&p, 5, 3);
        assert_eq!(qty, 3);
    }

    #[test]
    fn add_snapshots_discounted_price() {
        let mut cart = Cart::default();
        let mut p = product(1, 10000);
        p.discount_price = Some(Decimal::new(8000, 2));
        cart.add(&p, 1, 10);
        assert_eq!(cart.items[0].unit_price, Decimal::new(8000, 2));
    }

    #[test]
    fn set_quantity_zero_removes() {
        let mut cart = Cart::default();
        let p = product(1, 1000);
        cart.add(&p, 2, 10);
        assert!(cart.set_quantity(p.id, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_unknown_product() {
        let mut cart = Cart::default();
        assert!(!cart.set_quantity(ProductId::new(99), 2));
    }

    #[test]
    fn subtotal_sums_lines() {
        let mut cart = Cart::default();
        cart.add(&product(1, 1000), 2, 10); // 2 x 10.00
        cart.add(&product(2, 2550), 1, 10); // 1 x 25.50
        assert_eq!(cart.subtotal(), Decimal::new(4550, 2));
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn order_items_mirror_cart_lines() {
        let mut cart = Cart::default();
        cart.add(&product(7, 1299), 2, 10);
        let items = cart.to_order_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, ProductId::new(7));
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].unit_price, Decimal::new(1299, 2));
    }
}
