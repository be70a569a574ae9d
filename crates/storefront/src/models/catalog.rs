//! Catalog models: products and categories.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use apexdrive_core::{CategoryId, ProductId};

/// A catalog product.
///
/// `category` is a free-text name matched case-insensitively against the
/// category list, not a foreign key. `images` is ordered; the first entry is
/// the cover image.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub category: String,
    pub vehicle_model: Option<String>,
    pub images: Vec<String>,
    pub stock: i32,
    pub is_new: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The price the customer actually pays (discount wins when set).
    #[must_use]
    pub fn effective_price(&self) -> Decimal {
        self.discount_price.unwrap_or(self.price)
    }

    /// Cover image URL, if any images exist.
    #[must_use]
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Whether the product can currently be added to a cart.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// A catalog category, maintained separately from products.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub image_url: String,
    pub sort_order: i32,
    pub enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: Decimal, discount: Option<Decimal>, stock: i32) -> Product {
        Product {
            id: ProductId::new(1),
            name: "LED tail light set".to_string(),
            description: String::new(),
            price,
            discount_price: discount,
            category: "Lighting".to_string(),
            vehicle_model: None,
            images: vec!["https://img.test/cover.jpg".to_string()],
            stock,
            is_new: false,
            is_featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn effective_price_prefers_discount() {
        let p = product(Decimal::new(9900, 2), Some(Decimal::new(7900, 2)), 4);
        assert_eq!(p.effective_price(), Decimal::new(7900, 2));
    }

    #[test]
    fn effective_price_without_discount() {
        let p = product(Decimal::new(9900, 2), None, 4);
        assert_eq!(p.effective_price(), Decimal::new(9900, 2));
    }

    #[test]
    fn cover_image_is_first() {
        let mut p = product(Decimal::ONE, None, 1);
        p.images = vec!["a.jpg".to_string(), "b.jpg".to_string()];
        assert_eq!(p.cover_image(), Some("a.jpg"));
        p.images.clear();
        assert_eq!(p.cover_image(), None);
    }

    #[test]
    fn stock_check() {
        assert!(product(Decimal::ONE, None, 1).in_stock());
        assert!(!product(Decimal::ONE, None, 0).in_stock());
    }
}
