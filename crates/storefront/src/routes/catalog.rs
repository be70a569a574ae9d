//! Catalog route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use apexdrive_core::ProductId;

use crate::db::CatalogRepository;
use crate::db::catalog::{ProductFilter, ProductSort};
use crate::error::{AppError, Result};
use crate::models::catalog::{Category, Product};
use crate::state::AppState;

/// Default page size for product listings.
const DEFAULT_PER_PAGE: i64 = 24;

/// Upper bound on requested page size.
const MAX_PER_PAGE: i64 = 100;

/// How many products the featured/new shelves return.
const SHELF_LIMIT: i64 = 12;

/// Query parameters for product listings.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub q: Option<String>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// A page of products.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

/// Product listing with filtering, sorting, and pagination.
#[instrument(skip(state))]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Result<Json<ProductListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);
    let offset = (page - 1) * per_page;

    let filter = ProductFilter {
        category: query.category.filter(|c| !c.trim().is_empty()),
        search: query.q.filter(|q| !q.trim().is_empty()),
    };
    let sort = ProductSort::from_query(query.sort.as_deref());

    let result = CatalogRepository::new(state.pool())
        .list(&filter, sort, per_page, offset)
        .await?;

    let total_pages = ((result.total + per_page - 1) / per_page).max(1);

    Ok(Json(ProductListResponse {
        products: result.products,
        page,
        per_page,
        total: result.total,
        total_pages,
    }))
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Product>> {
    let product = CatalogRepository::new(state.pool())
        .get(ProductId::new(id))
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

/// Featured products shelf.
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = CatalogRepository::new(state.pool())
        .featured(SHELF_LIMIT)
        .await?;
    Ok(Json(products))
}

/// New-arrivals shelf.
#[instrument(skip(state))]
pub async fn new_arrivals(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = CatalogRepository::new(state.pool())
        .new_arrivals(SHELF_LIMIT)
        .await?;
    Ok(Json(products))
}

/// Enabled categories in display order.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CatalogRepository::new(state.pool()).categories().await?;
    Ok(Json(categories))
}
