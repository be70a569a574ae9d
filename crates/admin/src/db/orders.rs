//! Order repository for the admin console.
//!
//! Status fields are stored as lowercase text and parsed on read; a row
//! that fails to parse is reported as data corruption rather than silently
//! skipped.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, QueryBuilder};
use std::str::FromStr;

use apexdrive_core::{OrderNumber, OrderStatus, PaymentMethod, PaymentStatus};

use super::RepositoryError;
use crate::models::order::{Order, OrderItem};

#[derive(FromRow)]
struct OrderRow {
    order_number: String,
    items: Json<Vec<OrderItem>>,
    customer_name: String,
    customer_email: String,
    customer_phone: String,
    address_line: String,
    city: String,
    postal_code: String,
    payment_method: String,
    payment_status: String,
    payment_reference: Option<String>,
    status: String,
    subtotal: Decimal,
    total: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let order_number = OrderNumber::parse(&row.order_number).ok_or_else(|| {
            RepositoryError::DataCorruption(format!(
                "invalid order number in database: {}",
                row.order_number
            ))
        })?;
        let payment_method = PaymentMethod::from_str(&row.payment_method)
            .map_err(RepositoryError::DataCorruption)?;
        let payment_status = PaymentStatus::from_str(&row.payment_status)
            .map_err(RepositoryError::DataCorruption)?;
        let status = OrderStatus::from_str(&row.status).map_err(RepositoryError::DataCorruption)?;

        Ok(Self {
            order_number,
            items: row.items.0,
            customer_name: row.customer_name,
            customer_email: row.customer_email,
            customer_phone: row.customer_phone,
            address_line: row.address_line,
            city: row.city,
            postal_code: row.postal_code,
            payment_method,
            payment_status,
            payment_reference: row.payment_reference,
            status,
            subtotal: row.subtotal,
            total: row.total,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const ORDER_COLUMNS: &str = "order_number, items, customer_name, customer_email, customer_phone, \
     address_line, city, postal_code, payment_method, payment_status, payment_reference, \
     status, subtotal, total, created_at, updated_at";

/// One page of orders plus the unpaginated total.
#[derive(Debug)]
pub struct OrderPage {
    pub orders: Vec<Order>,
    pub total: i64,
}

/// Dashboard counters derived from the order table.
///
/// Carries one counter per fulfilment status so the dashboard can render a
/// full status breakdown.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OrderStats {
    pub total_orders: i64,
    pub pending_orders: i64,
    pub processing_orders: i64,
    pub shipped_orders: i64,
    pub delivered_orders: i64,
    pub cancelled_orders: i64,
    /// Sum of order totals excluding cancelled orders.
    pub revenue: Decimal,
}

/// Repository for admin order operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List orders newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails, or
    /// `RepositoryError::DataCorruption` for invalid stored fields.
    pub async fn list(
        &self,
        status: Option<OrderStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<OrderPage, RepositoryError> {
        let mut query = QueryBuilder::new(format!("SELECT {ORDER_COLUMNS} FROM shop_order"));
        if let Some(status) = status {
            query.push(" WHERE status = ");
            query.push_bind(status.to_string());
        }
        query.push(" ORDER BY created_at DESC LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let rows = query.build_query_as::<OrderRow>().fetch_all(self.pool).await?;
        let orders = rows
            .into_iter()
            .map(Order::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM shop_order");
        if let Some(status) = status {
            count.push(" WHERE status = ");
            count.push_bind(status.to_string());
        }
        let total: i64 = count.build_query_scalar().fetch_one(self.pool).await?;

        Ok(OrderPage { orders, total })
    }

    /// Get one order by its number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` for invalid stored fields.
    pub async fn get(&self, order_number: &OrderNumber) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM shop_order WHERE order_number = $1"
        ))
        .bind(order_number.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    /// Set an order's fulfilment status. Returns `None` for an unknown number.
    ///
    /// Any status can be set from any other; operators correct mistakes by
    /// moving orders backwards.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn set_status(
        &self,
        order_number: &OrderNumber,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE shop_order SET status = $2, updated_at = now() \
             WHERE order_number = $1 \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(order_number.as_str())
        .bind(status.to_string())
        .fetch_optional(self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    /// Set an order's payment status. Returns `None` for an unknown number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn set_payment_status(
        &self,
        order_number: &OrderNumber,
        payment_status: PaymentStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE shop_order SET payment_status = $2, updated_at = now() \
             WHERE order_number = $1 \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(order_number.as_str())
        .bind(payment_status.to_string())
        .fetch_optional(self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    /// Order counters for the dashboard.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stats(&self) -> Result<OrderStats, RepositoryError> {
        let row = sqlx::query_as::<_, (i64, i64, i64, i64, i64, i64, Option<Decimal>)>(
            "SELECT COUNT(*), \
                 COUNT(*) FILTER (WHERE status = 'pending'), \
                 COUNT(*) FILTER (WHERE status = 'processing'), \
                 COUNT(*) FILTER (WHERE status = 'shipped'), \
                 COUNT(*) FILTER (WHERE status = 'delivered'), \
                 COUNT(*) FILTER (WHERE status = 'cancelled'), \
                 SUM(total) FILTER (WHERE status <> 'cancelled') \
             FROM shop_order",
        )
        .fetch_one(self.pool)
        .await?;

        let (total, pending, processing, shipped, delivered, cancelled, revenue) = row;
        Ok(OrderStats {
            total_orders: total,
            pending_orders: pending,
            processing_orders: processing,
            shipped_orders: shipped,
            delivered_orders: delivered,
            cancelled_orders: cancelled,
            revenue: revenue.unwrap_or(Decimal::ZERO),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_expose_every_fulfilment_status() {
        let stats = OrderStats {
            total_orders: 5,
            pending_orders: 1,
            processing_orders: 1,
            shipped_orders: 1,
            delivered_orders: 1,
            cancelled_orders: 1,
            revenue: Decimal::new(19960, 2),
        };

        let json = serde_json::to_value(&stats).unwrap();
        for key in [
            "pending_orders",
            "processing_orders",
            "shipped_orders",
            "delivered_orders",
            "cancelled_orders",
        ] {
            assert_eq!(json[key], 1, "missing status counter: {key}");
        }
        assert_eq!(json["total_orders"], 5);
        assert_eq!(json["revenue"], "199.60");
    }
}
