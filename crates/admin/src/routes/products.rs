//! Product management route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use apexdrive_core::ProductId;

use crate::db::ProductRepository;
use crate::db::products::ProductInput;
use crate::error::{AdminError, Result};
use crate::middleware::RequireAdmin;
use crate::models::catalog::Product;
use crate::state::AppState;

const DEFAULT_PER_PAGE: i64 = 25;
const MAX_PER_PAGE: i64 = 100;

/// Query parameters for the product list.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    /// Name search term.
    pub q: Option<String>,
    /// Category name filter.
    pub category: Option<String>,
    /// 1-based page number.
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Product list payload.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// Product create/update request body.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub category: String,
    pub vehicle_model: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_featured: bool,
}

impl ProductRequest {
    /// Validate and convert into a repository input.
    fn into_input(self) -> Result<ProductInput> {
        if self.name.trim().is_empty() {
            return Err(AdminError::BadRequest("name is required".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(AdminError::BadRequest("category is required".to_string()));
        }
        if self.price <= Decimal::ZERO {
            return Err(AdminError::BadRequest("price must be positive".to_string()));
        }
        if let Some(discount) = self.discount_price {
            if discount <= Decimal::ZERO || discount >= self.price {
                return Err(AdminError::BadRequest(
                    "discount price must be positive and below the regular price".to_string(),
                ));
            }
        }
        if self.stock < 0 {
            return Err(AdminError::BadRequest(
                "stock cannot be negative".to_string(),
            ));
        }
        let images: Vec<String> = self
            .images
            .into_iter()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .collect();
        if images.is_empty() {
            return Err(AdminError::BadRequest(
                "at least one image is required".to_string(),
            ));
        }

        Ok(ProductInput {
            name: self.name.trim().to_string(),
            description: self.description,
            price: self.price,
            discount_price: self.discount_price,
            category: self.category.trim().to_string(),
            vehicle_model: self.vehicle_model,
            images,
            stock: self.stock,
            is_new: self.is_new,
            is_featured: self.is_featured,
        })
    }
}

/// Paginated product list with optional search and category filter.
#[instrument(skip(state, _admin))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);
    let offset = (page - 1) * per_page;

    let search = query.q.as_deref().filter(|q| !q.trim().is_empty());
    let category = query
        .category
        .as_deref()
        .filter(|c| !c.trim().is_empty());

    let result = ProductRepository::new(state.pool())
        .list(search, category, per_page, offset)
        .await?;

    Ok(Json(ProductListResponse {
        products: result.products,
        total: result.total,
        page,
        per_page,
    }))
}

/// One product by id.
#[instrument(skip(state, _admin))]
pub async fn show(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .get(ProductId::new(id))
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

/// Create a product.
#[instrument(skip(state, _admin, request))]
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<ProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    let product = ProductRepository::new(state.pool())
        .create(request.into_input()?)
        .await?;

    tracing::info!(product_id = %product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

/// Replace a product's fields.
#[instrument(skip(state, _admin, request))]
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<ProductRequest>,
) -> Result<Json<Product>> {
    let product = ProductRepository::new(state.pool())
        .update(ProductId::new(id), request.into_input()?)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

/// Delete a product. Past orders keep their snapshots.
#[instrument(skip(state, _admin))]
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let deleted = ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await?;

    if !deleted {
        return Err(AdminError::NotFound(format!("product {id}")));
    }

    tracing::info!(product_id = id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProductRequest {
        ProductRequest {
            name: "Carbon mirror caps".to_string(),
            description: "Gloss finish".to_string(),
            price: Decimal::new(12900, 2),
            discount_price: None,
            category: "Exterior".to_string(),
            vehicle_model: Some("GT86".to_string()),
            images: vec!["/images/mirror-caps.jpg".to_string()],
            stock: 10,
            is_new: true,
            is_featured: false,
        }
    }

    #[test]
    fn valid_request_converts() {
        assert!(request().into_input().is_ok());
    }

    #[test]
    fn empty_name_rejected() {
        let mut r = request();
        r.name = "  ".to_string();
        assert!(matches!(r.into_input(), Err(AdminError::BadRequest(_))));
    }

    #[test]
    fn non_positive_price_rejected() {
        let mut r = request();
        r.price = Decimal::ZERO;
        assert!(matches!(r.into_input(), Err(AdminError::BadRequest(_))));
    }

    #[test]
    fn discount_must_undercut_price() {
        let mut r = request();
        r.discount_price = Some(Decimal::new(12900, 2));
        assert!(matches!(r.into_input(), Err(AdminError::BadRequest(_))));

        let mut r = request();
        r.discount_price = Some(Decimal::new(9900, 2));
        assert!(r.into_input().is_ok());
    }

    #[test]
    fn blank_image_urls_rejected() {
        let mut r = request();
        r.images = vec!["   ".to_string()];
        assert!(matches!(r.into_input(), Err(AdminError::BadRequest(_))));
    }

    #[test]
    fn negative_stock_rejected() {
        let mut r = request();
        r.stock = -1;
        assert!(matches!(r.into_input(), Err(AdminError::BadRequest(_))));
    }
}
