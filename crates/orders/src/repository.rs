use std::sync::Arc;

use async_trait::async_trait;

use orderdesk_core::{AppResult, OrderId};

use crate::order::{NewOrder, Order};

/// Persistence contract for orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: OrderId) -> AppResult<Option<Order>>;

    async fn create(&self, data: NewOrder) -> AppResult<Order>;
}

#[async_trait]
impl<R> OrderRepository for Arc<R>
where
    R: OrderRepository + ?Sized,
{
    async fn find_by_id(&self, id: OrderId) -> AppResult<Option<Order>> {
        (**self).find_by_id(id).await
    }

    async fn create(&self, data: NewOrder) -> AppResult<Order> {
        (**self).create(data).await
    }
}
