use sqlx::PgPool;
use tracing::instrument;

use orderdesk_core::AppResult;

use super::map_sqlx_error;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        CONSTRAINT customers_email_key UNIQUE (email)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id UUID PRIMARY KEY,
        name TEXT NOT NULL,
        price NUMERIC(12, 2) NOT NULL,
        quantity BIGINT NOT NULL CHECK (quantity >= 0),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id UUID PRIMARY KEY,
        customer_id UUID NOT NULL REFERENCES customers (id),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders_products (
        order_id UUID NOT NULL REFERENCES orders (id),
        position INTEGER NOT NULL,
        product_id UUID NOT NULL REFERENCES products (id),
        quantity BIGINT NOT NULL,
        price NUMERIC(12, 2) NOT NULL,
        PRIMARY KEY (order_id, position)
    )
    "#,
];

/// Create the tables this backend needs if they do not exist yet.
///
/// Idempotent; there is no migration history.
#[instrument(skip(pool))]
pub async fn ensure_schema(pool: &PgPool) -> AppResult<()> {
    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
    }
    tracing::info!(tables = STATEMENTS.len(), "schema ready");
    Ok(())
}
