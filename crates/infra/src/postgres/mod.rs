//! Postgres-backed repositories.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `AppError` as follows:
//!
//! | SQLx Error | PostgreSQL Error Code | AppError |
//! |------------|----------------------|----------|
//! | Database (unique violation on `customers.email`) | `23505` | `DuplicateEmail` |
//! | Database (other) | any | `Store` |
//! | PoolClosed | N/A | `Store` |
//! | Other | N/A | `Store` |

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use orderdesk_core::{AppError, AppResult};

use crate::config::StoreConfig;

mod customers;
mod orders;
mod products;
mod schema;

pub use customers::PostgresCustomerRepository;
pub use orders::PostgresOrderRepository;
pub use products::PostgresProductRepository;
pub use schema::ensure_schema;

/// Open a connection pool for the configured database.
pub async fn connect(config: &StoreConfig) -> AppResult<PgPool> {
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| AppError::store("DATABASE_URL is not configured"))?;

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(url)
        .await
        .map_err(|e| map_sqlx_error("connect", e))
}

pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some("customers_email_key")
            {
                return AppError::DuplicateEmail;
            }
            AppError::store(format!("database error in {}: {}", operation, db_err.message()))
        }
        sqlx::Error::PoolClosed => {
            AppError::store(format!("connection pool closed in {}", operation))
        }
        other => AppError::store(format!("{} failed: {}", operation, other)),
    }
}
