//! Category repository for the admin console.
//!
//! Products reference categories by name, not foreign key, so deleting a
//! category that products still use would orphan them in the storefront
//! navigation. Deletion is refused while references exist.

use sqlx::PgPool;

use apexdrive_core::CategoryId;

use super::{RepositoryError, is_unique_violation};
use crate::models::catalog::Category;

/// Fields supplied when creating or updating a category.
#[derive(Debug, Clone)]
pub struct CategoryInput {
    pub name: String,
    pub image_url: String,
    pub sort_order: i32,
    pub enabled: bool,
}

const CATEGORY_COLUMNS: &str = "id, name, image_url, sort_order, enabled, created_at";

/// Repository for admin category operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All categories including disabled ones, in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM category ORDER BY sort_order, id"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Get one category by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let category = sqlx::query_as::<_, Category>(&format!(
            "SELECT {CATEGORY_COLUMNS} FROM category WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(category)
    }

    /// Insert a new category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a category with the same name
    /// (case-insensitive) already exists.
    pub async fn create(&self, input: CategoryInput) -> Result<Category, RepositoryError> {
        let result = sqlx::query_as::<_, Category>(&format!(
            "INSERT INTO category (name, image_url, sort_order, enabled) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.image_url)
        .bind(input.sort_order)
        .bind(input.enabled)
        .fetch_one(self.pool)
        .await;

        match result {
            Ok(category) => Ok(category),
            Err(err) if is_unique_violation(&err) => Err(RepositoryError::Conflict(format!(
                "category '{}' already exists",
                input.name
            ))),
            Err(err) => Err(err.into()),
        }
    }

    /// Replace a category's fields. Returns `None` for an unknown id.
    ///
    /// Renaming does not rewrite products that reference the old name; the
    /// editor surfaces the reference count so the operator can move them.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` on a duplicate name.
    pub async fn update(
        &self,
        id: CategoryId,
        input: CategoryInput,
    ) -> Result<Option<Category>, RepositoryError> {
        let result = sqlx::query_as::<_, Category>(&format!(
            "UPDATE category SET name = $2, image_url = $3, sort_order = $4, enabled = $5 \
             WHERE id = $1 \
             RETURNING {CATEGORY_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.image_url)
        .bind(input.sort_order)
        .bind(input.enabled)
        .fetch_optional(self.pool)
        .await;

        match result {
            Ok(category) => Ok(category),
            Err(err) if is_unique_violation(&err) => Err(RepositoryError::Conflict(format!(
                "category '{}' already exists",
                input.name
            ))),
            Err(err) => Err(err.into()),
        }
    }

    /// Delete a category. Returns `false` for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if any product still references
    /// the category name.
    pub async fn delete(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let name: Option<String> =
            sqlx::query_scalar("SELECT name FROM category WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(name) = name else {
            return Ok(false);
        };

        // Count inside the transaction so the check and the delete see the
        // same snapshot.
        let references: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM product WHERE LOWER(category) = LOWER($1)")
                .bind(&name)
                .fetch_one(&mut *tx)
                .await?;
        if references > 0 {
            return Err(RepositoryError::Conflict(format!(
                "category '{name}' is referenced by {references} product(s)"
            )));
        }

        sqlx::query("DELETE FROM category WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(true)
    }

    /// Number of products referencing the given category name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn product_references(&self, name: &str) -> Result<i64, RepositoryError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM product WHERE LOWER(category) = LOWER($1)")
                .bind(name)
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }
}
