use std::sync::Arc;

use async_trait::async_trait;

use orderdesk_core::{AppResult, ProductId};

use crate::product::{CreateProduct, Product, ProductQuantity};

/// Persistence contract for the product catalog.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>>;

    /// Resolve every known product among `ids`; unknown ids are skipped and
    /// each product appears at most once.
    async fn find_all_by_ids(&self, ids: &[ProductId]) -> AppResult<Vec<Product>>;

    async fn create(&self, data: CreateProduct) -> AppResult<Product>;

    /// Decrement stock by each entry's quantity.
    ///
    /// Repeated ids accumulate. The batch is applied all-or-nothing: if any
    /// product would drop below zero nothing is written.
    async fn update_quantity(&self, decrements: &[ProductQuantity]) -> AppResult<Vec<Product>>;
}

#[async_trait]
impl<R> ProductRepository for Arc<R>
where
    R: ProductRepository + ?Sized,
{
    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        (**self).find_by_id(id).await
    }

    async fn find_all_by_ids(&self, ids: &[ProductId]) -> AppResult<Vec<Product>> {
        (**self).find_all_by_ids(ids).await
    }

    async fn create(&self, data: CreateProduct) -> AppResult<Product> {
        (**self).create(data).await
    }

    async fn update_quantity(&self, decrements: &[ProductQuantity]) -> AppResult<Vec<Product>> {
        (**self).update_quantity(decrements).await
    }
}
