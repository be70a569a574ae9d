//! Order repository.
//!
//! Order creation runs in a transaction with the stock decrements so a
//! concurrent checkout cannot oversell: the conditional `UPDATE ... WHERE
//! stock >= quantity` either claims the units or affects zero rows.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use std::str::FromStr;

use apexdrive_core::{OrderNumber, OrderStatus, PaymentMethod, PaymentStatus};

use super::RepositoryError;
use crate::models::order::{Order, OrderItem};

/// Everything needed to insert a new order.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_number: OrderNumber,
    pub items: Vec<OrderItem>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub address_line: String,
    pub city: String,
    pub postal_code: String,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub payment_reference: Option<String>,
    pub subtotal: Decimal,
    pub total: Decimal,
}

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

/// Repository for storefront order operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an order and decrement stock for each line, atomically.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` naming the product if any line
    /// has insufficient stock. Returns `RepositoryError::Database` for
    /// other database errors.
    pub async fn create(&self, new_order: NewOrder) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        for item in &new_order.items {
            let result = sqlx::query(
                "UPDATE product SET stock = stock - $1, updated_at = now() \
                 WHERE id = $2 AND stock >= $1",
            )
            .bind(i32::try_from(item.quantity).unwrap_or(i32::MAX))
            .bind(item.product_id)
            .execute(&mut *tx)
            .await?;

            if result.rows_affected() == 0 {
                return Err(RepositoryError::Conflict(format!(
                    "insufficient stock for {}",
                    item.name
                )));
            }
        }

        let (created_at, updated_at) = sqlx::query_as::<_, (DateTime<Utc>, DateTime<Utc>)>(
            "INSERT INTO shop_order (order_number, items, customer_name, customer_email, \
                 customer_phone, address_line, city, postal_code, payment_method, \
                 payment_status, payment_reference, subtotal, total) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING created_at, updated_at",
        )
        .bind(new_order.order_number.as_str())
        .bind(Json(&new_order.items))
        .bind(&new_order.customer_name)
        .bind(&new_order.customer_email)
        .bind(&new_order.customer_phone)
        .bind(&new_order.address_line)
        .bind(&new_order.city)
        .bind(&new_order.postal_code)
        .bind(new_order.payment_method.to_string())
        .bind(new_order.payment_status.to_string())
        .bind(&new_order.payment_reference)
        .bind(new_order.subtotal)
        .bind(new_order.total)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Order {
            order_number: new_order.order_number,
            items: new_order.items,
            customer_name: new_order.customer_name,
            customer_email: new_order.customer_email,
            customer_phone: new_order.customer_phone,
            address_line: new_order.address_line,
            city: new_order.city,
            postal_code: new_order.postal_code,
            payment_method: new_order.payment_method,
            payment_status: new_order.payment_status,
            payment_reference: new_order.payment_reference,
            status: OrderStatus::Pending,
            subtotal: new_order.subtotal,
            total: new_order.total,
            created_at,
            updated_at,
        })
    }

    /// Orders placed with the given email, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored row has invalid
    /// status or payment fields.
    pub async fn list_for_email(&self, email: &str) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM shop_order \
             WHERE LOWER(customer_email) = LOWER($1) \
             ORDER BY created_at DESC"
        ))
        .bind(email)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
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

    /// Record the payment status reported by the gateway. Returns `None`
    /// for an unknown number.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails, or
    /// `RepositoryError::DataCorruption` for invalid stored fields.
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
}
