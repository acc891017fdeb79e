//! Order repository for database operations.
//!
//! Orders are append-only: the storefront writes them at checkout and never
//! reads them back. Fulfillment works off the notification channel and
//! direct database access.

use sqlx::PgPool;

use greenridge_core::order::Order;
use greenridge_core::stores::OrderStore;
use greenridge_core::types::OrderId;

use super::RepositoryError;

/// Repository for order database operations. Implements
/// [`OrderStore`] for the checkout flow.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }
}

impl OrderStore for OrderRepository<'_> {
    type Error = RepositoryError;

    /// Persist an order and its lines in one transaction.
    ///
    /// Line order is preserved through a `position` column. If any
    /// statement fails the transaction rolls back and nothing is
    /// persisted.
    async fn append(&self, order: &Order) -> Result<OrderId, RepositoryError> {
        let customer_social = serde_json::to_string(&order.customer.social).map_err(|e| {
            RepositoryError::DataCorruption(format!("failed to serialize customer social: {e}"))
        })?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO orders (id, customer_name, customer_phone, customer_social,
                                subtotal, shipping_cost, total, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(order.id.as_uuid())
        .bind(&order.customer.name)
        .bind(order.customer.phone.as_deref())
        .bind(&customer_social)
        .bind(order.subtotal)
        .bind(order.shipping_cost)
        .bind(order.total)
        .bind(order.created_at)
        .execute(&mut *tx)
        .await?;

        for (position, line) in order.lines.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO order_lines (order_id, position, item_id, title, unit_price,
                                         quantity, category, category_key, image_url)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ",
            )
            .bind(order.id.as_uuid())
            .bind(i32::try_from(position).unwrap_or(i32::MAX))
            .bind(&line.item_id)
            .bind(&line.title)
            .bind(line.unit_price)
            .bind(i64::from(line.quantity))
            .bind(&line.category)
            .bind(&line.category_key)
            .bind(line.image_url.as_deref())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order.id)
    }
}
