use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row};

use orderdesk_core::{AppResult, OrderId, ProductId};
use orderdesk_orders::{NewOrder, Order, OrderLineItem, OrderRepository};

use super::customers::customer_from_row;
use super::map_sqlx_error;

/// Postgres-backed order store (`orders` + `orders_products`).
#[derive(Debug, Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_line_items(&self, id: OrderId) -> AppResult<Vec<OrderLineItem>> {
        let rows = sqlx::query(
            r#"
            SELECT product_id, quantity, price
            FROM orders_products
            WHERE order_id = $1
            ORDER BY position
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("load_order_products", e))?;

        rows.iter()
            .map(|r| {
                Ok(OrderLineItem {
                    product_id: ProductId::from_uuid(r.try_get("product_id")?),
                    quantity: r.try_get("quantity")?,
                    price: r.try_get("price")?,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .map_err(|e| map_sqlx_error("load_order_products", e))
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    async fn find_by_id(&self, id: OrderId) -> AppResult<Option<Order>> {
        let row = sqlx::query(
            r#"
            SELECT
                o.id,
                o.created_at,
                o.updated_at,
                c.id AS customer_id,
                c.name AS customer_name,
                c.email AS customer_email,
                c.created_at AS customer_created_at,
                c.updated_at AS customer_updated_at
            FROM orders o
            JOIN customers c ON c.id = o.customer_id
            WHERE o.id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_order_by_id", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let customer =
            customer_from_row(&row, "customer_").map_err(|e| map_sqlx_error("find_order_by_id", e))?;
        let created_at = row
            .try_get("created_at")
            .map_err(|e| map_sqlx_error("find_order_by_id", e))?;
        let updated_at = row
            .try_get("updated_at")
            .map_err(|e| map_sqlx_error("find_order_by_id", e))?;

        Ok(Some(Order {
            id,
            customer,
            products: self.load_line_items(id).await?,
            created_at,
            updated_at,
        }))
    }

    async fn create(&self, data: NewOrder) -> AppResult<Order> {
        let order = Order::place(data, Utc::now());

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_insert_order", e))?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, customer_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.customer.id.as_uuid())
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("insert_order", e))?;

        for (position, line) in order.products.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO orders_products (order_id, position, product_id, quantity, price)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(order.id.as_uuid())
            .bind(position as i32)
            .bind(line.product_id.as_uuid())
            .bind(line.quantity)
            .bind(line.price)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("insert_order_product", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_insert_order", e))?;
        Ok(order)
    }
}
