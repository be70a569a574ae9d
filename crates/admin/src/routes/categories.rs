//! Category management route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use apexdrive_core::CategoryId;

use crate::db::CategoryRepository;
use crate::db::categories::CategoryInput;
use crate::error::{AdminError, Result};
use crate::middleware::RequireAdmin;
use crate::models::catalog::Category;
use crate::state::AppState;

/// Category create/update request body.
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

impl CategoryRequest {
    fn into_input(self) -> Result<CategoryInput> {
        if self.name.trim().is_empty() {
            return Err(AdminError::BadRequest("name is required".to_string()));
        }

        Ok(CategoryInput {
            name: self.name.trim().to_string(),
            image_url: self.image_url,
            sort_order: self.sort_order,
            enabled: self.enabled,
        })
    }
}

/// A category plus how many products reference it.
#[derive(Debug, Serialize)]
pub struct CategoryWithReferences {
    #[serde(flatten)]
    pub category: Category,
    pub product_count: i64,
}

/// All categories with their product reference counts.
#[instrument(skip(state, _admin))]
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryWithReferences>>> {
    let repo = CategoryRepository::new(state.pool());
    let categories = repo.list().await?;

    let mut result = Vec::with_capacity(categories.len());
    for category in categories {
        let product_count = repo.product_references(&category.name).await?;
        result.push(CategoryWithReferences {
            category,
            product_count,
        });
    }

    Ok(Json(result))
}

/// Create a category.
#[instrument(skip(state, _admin, request))]
pub async fn create(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Json(request): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<Category>)> {
    let category = CategoryRepository::new(state.pool())
        .create(request.into_input()?)
        .await?;

    tracing::info!(category_id = %category.id, "category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// Replace a category's fields.
#[instrument(skip(state, _admin, request))]
pub async fn update(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(request): Json<CategoryRequest>,
) -> Result<Json<Category>> {
    let category = CategoryRepository::new(state.pool())
        .update(CategoryId::new(id), request.into_input()?)
        .await?
        .ok_or_else(|| AdminError::NotFound(format!("category {id}")))?;

    Ok(Json(category))
}

/// Delete a category; refused with 409 while products reference it.
#[instrument(skip(state, _admin))]
pub async fn delete(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode> {
    let deleted = CategoryRepository::new(state.pool())
        .delete(CategoryId::new(id))
        .await?;

    if !deleted {
        return Err(AdminError::NotFound(format!("category {id}")));
    }

    tracing::info!(category_id = id, "category deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_rejected() {
        let request = CategoryRequest {
            name: String::new(),
            image_url: String::new(),
            sort_order: 0,
            enabled: true,
        };
        assert!(matches!(
            request.into_input(),
            Err(AdminError::BadRequest(_))
        ));
    }

    #[test]
    fn name_is_trimmed() {
        let request = CategoryRequest {
            name: "  Lighting  ".to_string(),
            image_url: String::new(),
            sort_order: 2,
            enabled: false,
        };
        let input = request.into_input().expect("valid");
        assert_eq!(input.name, "Lighting");
    }
}
