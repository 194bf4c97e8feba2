use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use orderdesk_core::{AppResult, CustomerId};
use orderdesk_customers::{CreateCustomer, Customer, CustomerRepository};

use super::map_sqlx_error;

/// Postgres-backed customer store.
///
/// E-mail uniqueness is also enforced by the `customers_email_key` constraint;
/// a violation surfaces as `AppError::DuplicateEmail`.
#[derive(Debug, Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub(crate) fn customer_from_row(row: &PgRow, prefix: &str) -> Result<Customer, sqlx::Error> {
    Ok(Customer {
        id: CustomerId::from_uuid(row.try_get(format!("{prefix}id").as_str())?),
        name: row.try_get(format!("{prefix}name").as_str())?,
        email: row.try_get(format!("{prefix}email").as_str())?,
        created_at: row.try_get(format!("{prefix}created_at").as_str())?,
        updated_at: row.try_get(format!("{prefix}updated_at").as_str())?,
    })
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    async fn find_by_id(&self, id: CustomerId) -> AppResult<Option<Customer>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_customer_by_id", e))?;

        row.map(|r| customer_from_row(&r, ""))
            .transpose()
            .map_err(|e| map_sqlx_error("find_customer_by_id", e))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, created_at, updated_at
            FROM customers
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_customer_by_email", e))?;

        row.map(|r| customer_from_row(&r, ""))
            .transpose()
            .map_err(|e| map_sqlx_error("find_customer_by_email", e))
    }

    async fn create(&self, data: CreateCustomer) -> AppResult<Customer> {
        let customer = Customer::register(data, Utc::now());

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(customer.id.as_uuid())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.created_at)
        .bind(customer.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_customer", e))?;

        Ok(customer)
    }
}
