use std::sync::Arc;

use async_trait::async_trait;

use orderdesk_core::{AppResult, CustomerId};

use crate::customer::{CreateCustomer, Customer};

/// Persistence contract for customers.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: CustomerId) -> AppResult<Option<Customer>>;

    /// Exact, case-sensitive e-mail match.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>>;

    async fn create(&self, data: CreateCustomer) -> AppResult<Customer>;
}

#[async_trait]
impl<R> CustomerRepository for Arc<R>
where
    R: CustomerRepository + ?Sized,
{
    async fn find_by_id(&self, id: CustomerId) -> AppResult<Option<Customer>> {
        (**self).find_by_id(id).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>> {
        (**self).find_by_email(email).await
    }

    async fn create(&self, data: CreateCustomer) -> AppResult<Customer> {
        (**self).create(data).await
    }
}
