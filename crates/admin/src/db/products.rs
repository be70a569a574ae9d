//! Product repository for the admin console.

use rust_decimal::Decimal;
use sqlx::{PgPool, QueryBuilder};

use apexdrive_core::ProductId;

use super::RepositoryError;
use crate::models::catalog::Product;

/// Fields supplied when creating or fully updating a product.
///
/// Updates replace the whole row (the editor always submits the full form),
/// so create and update share this struct.
#[derive(Debug, Clone)]
pub struct ProductInput {
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
}

/// One page of products plus the unpaginated total.
#[derive(Debug)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: i64,
}

const PRODUCT_COLUMNS: &str = "id, name, description, price, discount_price, category, \
     vehicle_model, images, stock, is_new, is_featured, created_at, updated_at";

/// Repository for admin product operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products, newest first, optionally filtered by name search
    /// and category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(
        &self,
        search: Option<&str>,
        category: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<ProductPage, RepositoryError> {
        let mut query = QueryBuilder::new(format!("SELECT {PRODUCT_COLUMNS} FROM product"));
        push_filters(&mut query, search, category);
        query.push(" ORDER BY created_at DESC, id DESC LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let products = query
            .build_query_as::<Product>()
            .fetch_all(self.pool)
            .await?;

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM product");
        push_filters(&mut count, search, category);
        let total: i64 = count.build_query_scalar().fetch_one(self.pool).await?;

        Ok(ProductPage { products, total })
    }

    /// Get one product by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Insert a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: ProductInput) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "INSERT INTO product (name, description, price, discount_price, category, \
                 vehicle_model, images, stock, is_new, is_featured) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.discount_price)
        .bind(&input.category)
        .bind(&input.vehicle_model)
        .bind(&input.images)
        .bind(input.stock)
        .bind(input.is_new)
        .bind(input.is_featured)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Replace a product's fields.
    ///
    /// Returns `None` if no product has the given id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        id: ProductId,
        input: ProductInput,
    ) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "UPDATE product SET name = $2, description = $3, price = $4, \
                 discount_price = $5, category = $6, vehicle_model = $7, images = $8, \
                 stock = $9, is_new = $10, is_featured = $11, updated_at = now() \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(input.price)
        .bind(input.discount_price)
        .bind(&input.category)
        .bind(&input.vehicle_model)
        .bind(&input.images)
        .bind(input.stock)
        .bind(input.is_new)
        .bind(input.is_featured)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Delete a product. Returns `false` if no product had the given id.
    ///
    /// Order history is unaffected: line items are JSONB snapshots, not
    /// references into this table.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Total product count, for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM product")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Products at or below the given stock level, lowest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn low_stock(&self, threshold: i32) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE stock <= $1 \
             ORDER BY stock ASC, id ASC"
        ))
        .bind(threshold)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }
}

/// Append WHERE clauses shared by the list and count queries.
fn push_filters(query: &mut QueryBuilder<'_, sqlx::Postgres>, search: Option<&str>, category: Option<&str>) {
    let mut has_where = false;

    if let Some(term) = search {
        query.push(" WHERE name ILIKE ");
        query.push_bind(format!("%{}%", escape_like(term)));
        has_where = true;
    }

    if let Some(name) = category {
        query.push(if has_where { " AND " } else { " WHERE " });
        query.push("LOWER(category) = LOWER(");
        query.push_bind(name.to_string());
        query.push(")");
    }
}

/// Escape LIKE metacharacters so search terms match literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_wildcards_are_escaped() {
        assert_eq!(escape_like("100% wool"), "100\\% wool");
        assert_eq!(escape_like("seat_cover"), "seat\\_cover");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }
}
