use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use orderdesk_core::{AppError, AppResult, ProductId};
use orderdesk_products::{
    merge_quantities, CreateProduct, Product, ProductQuantity, ProductRepository,
};

use super::map_sqlx_error;

/// Postgres-backed product catalog.
///
/// `update_quantity` runs in one transaction and each decrement is guarded by
/// `quantity >= $n`, so a concurrent order cannot oversell between the
/// service's check and the write.
#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn product_from_row(row: &PgRow) -> Result<Product, sqlx::Error> {
    Ok(Product {
        id: ProductId::from_uuid(row.try_get("id")?),
        name: row.try_get("name")?,
        price: row.try_get("price")?,
        quantity: row.try_get("quantity")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// Explain why a guarded decrement for `id` could not apply.
async fn shortfall_error<'e>(executor: impl PgExecutor<'e>, id: ProductId) -> AppError {
    let name: Result<Option<String>, sqlx::Error> =
        sqlx::query_scalar("SELECT name FROM products WHERE id = $1")
            .bind(*id.as_uuid())
            .fetch_optional(executor)
            .await;

    match name {
        Ok(Some(name)) => AppError::insufficient_stock(name),
        Ok(None) => AppError::ProductNotFound,
        Err(e) => map_sqlx_error("update_quantity", e),
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, price, quantity, created_at, updated_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_product_by_id", e))?;

        row.map(|r| product_from_row(&r))
            .transpose()
            .map_err(|e| map_sqlx_error("find_product_by_id", e))
    }

    async fn find_all_by_ids(&self, ids: &[ProductId]) -> AppResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = sqlx::query(
            r#"
            SELECT id, name, price, quantity, created_at, updated_at
            FROM products
            WHERE id = ANY($1)
            "#,
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_products_by_ids", e))?;

        rows.iter()
            .map(product_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error("find_products_by_ids", e))
    }

    async fn create(&self, data: CreateProduct) -> AppResult<Product> {
        let product = Product::from_request(data, Utc::now());

        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, quantity, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(product.price)
        .bind(product.quantity)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_product", e))?;

        Ok(product)
    }

    #[instrument(skip_all, fields(products = decrements.len()))]
    async fn update_quantity(&self, decrements: &[ProductQuantity]) -> AppResult<Vec<Product>> {
        let merged = match merge_quantities(decrements) {
            Ok(merged) => merged,
            Err(overflow) => return Err(shortfall_error(&self.pool, overflow.id).await),
        };

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_update_quantity", e))?;

        let mut updated = Vec::new();
        for entry in merged {
            let row = sqlx::query(
                r#"
                UPDATE products
                SET quantity = quantity - $2, updated_at = NOW()
                WHERE id = $1 AND quantity >= $2
                RETURNING id, name, price, quantity, created_at, updated_at
                "#,
            )
            .bind(entry.id.as_uuid())
            .bind(entry.quantity)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("update_quantity", e))?;

            match row {
                Some(row) => updated.push(
                    product_from_row(&row).map_err(|e| map_sqlx_error("update_quantity", e))?,
                ),
                None => {
                    // Dropping `tx` rolls back the decrements already applied.
                    return Err(shortfall_error(&mut *tx, entry.id).await);
                }
            }
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_update_quantity", e))?;
        Ok(updated)
    }
}
