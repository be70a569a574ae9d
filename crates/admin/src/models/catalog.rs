//! Catalog models as seen from the admin console.
//!
//! Unlike the storefront, the admin sees every row (disabled categories
//! included) and every timestamp.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use apexdrive_core::{CategoryId, ProductId};

/// A catalog product with full admin-visible detail.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    /// Free-text category name, matched case-insensitively.
    pub category: String,
    pub vehicle_model: Option<String>,
    /// Ordered image URLs; the first entry is the cover image.
    pub images: Vec<String>,
    pub stock: i32,
    pub is_new: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A catalog category row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub image_url: String,
    pub sort_order: i32,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
}
