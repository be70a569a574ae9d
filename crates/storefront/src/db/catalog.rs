//! Catalog repository: product and category reads.
//!
//! Filtering and sorting happen in SQL. Category matching is
//! case-insensitive because products carry the category as free text.

use sqlx::{PgPool, Postgres, QueryBuilder};

use apexdrive_core::ProductId;

use super::RepositoryError;
use crate::models::catalog::{Category, Product};

/// Sort orders for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Most recently created first.
    #[default]
    Newest,
    PriceAsc,
    PriceDesc,
    Name,
}

impl ProductSort {
    /// Parse the `sort` query parameter; unknown values fall back to newest.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("price_asc") => Self::PriceAsc,
            Some("price_desc") => Self::PriceDesc,
            Some("name") => Self::Name,
            _ => Self::Newest,
        }
    }

    /// ORDER BY clause for this sort. Ties break by id so pagination is
    /// stable.
    const fn order_by(self) -> &'static str {
        match self {
            Self::Newest => " ORDER BY created_at DESC, id DESC",
            // Sort by what the customer pays, not the list price
            Self::PriceAsc => " ORDER BY COALESCE(discount_price, price) ASC, id ASC",
            Self::PriceDesc => " ORDER BY COALESCE(discount_price, price) DESC, id ASC",
            Self::Name => " ORDER BY LOWER(name) ASC, id ASC",
        }
    }
}

/// Filters for product listings.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive exact category match.
    pub category: Option<String>,
    /// Substring match on name or description.
    pub search: Option<String>,
}

/// A page of products plus the total row count for the filter.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: i64,
}

const PRODUCT_COLUMNS: &str = "id, name, description, price, discount_price, category, \
     vehicle_model, images, stock, is_new, is_featured, created_at, updated_at";

/// Repository for catalog reads.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List products matching the filter, sorted and paginated.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(
        &self,
        filter: &ProductFilter,
        sort: ProductSort,
        limit: i64,
        offset: i64,
    ) -> Result<ProductPage, RepositoryError> {
        let mut query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE TRUE"
        ));
        push_filters(&mut query, filter);
        query.push(sort.order_by());
        query.push(" LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let products = query
            .build_query_as::<Product>()
            .fetch_all(self.pool)
            .await?;

        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM product WHERE TRUE");
        push_filters(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(self.pool).await?;

        Ok(ProductPage { products, total })
    }

    /// Get a product by id.
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

    /// Products flagged as featured, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn featured(&self, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE is_featured \
             ORDER BY created_at DESC, id DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Products flagged as new arrivals, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn new_arrivals(&self, limit: i64) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE is_new \
             ORDER BY created_at DESC, id DESC LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Enabled categories in display order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, image_url, sort_order, enabled FROM category \
             WHERE enabled ORDER BY sort_order, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }
}

/// Append WHERE conditions for the filter to a query builder.
fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    if let Some(category) = &filter.category {
        query.push(" AND LOWER(category) = LOWER(");
        query.push_bind(category.clone());
        query.push(")");
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(search));
        query.push(" AND (name ILIKE ");
        query.push_bind(pattern.clone());
        query.push(" OR description ILIKE ");
        query.push_bind(pattern);
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
    fn sort_parses_known_values() {
        assert_eq!(
            ProductSort::from_query(Some("price_asc")),
            ProductSort::PriceAsc
        );
        assert_eq!(
            ProductSort::from_query(Some("price_desc")),
            ProductSort::PriceDesc
        );
        assert_eq!(ProductSort::from_query(Some("name")), ProductSort::Name);
    }

    #[test]
    fn sort_falls_back_to_newest() {
        assert_eq!(ProductSort::from_query(None), ProductSort::Newest);
        assert_eq!(
            ProductSort::from_query(Some("popularity")),
            ProductSort::Newest
        );
    }

    #[test]
    fn price_sorts_use_effective_price() {
        assert!(ProductSort::PriceAsc.order_by().contains("COALESCE"));
        assert!(ProductSort::PriceDesc.order_by().contains("COALESCE"));
    }

    #[test]
    fn search_wildcards_are_escaped() {
        assert_eq!(escape_like("100% wool"), "100\\% wool");
        assert_eq!(escape_like("seat_cover"), "seat\\_cover");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
        assert_eq!(escape_like("plain"), "plain");
    }
}
