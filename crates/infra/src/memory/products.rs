use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;

use orderdesk_core::{AppError, AppResult, ProductId};
use orderdesk_products::{CreateProduct, Product, ProductQuantity, ProductRepository};

use super::record_store::RecordStore;

/// In-memory product catalog for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    records: RecordStore<Product>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
        self.records.get(id)
    }

    async fn find_all_by_ids(&self, ids: &[ProductId]) -> AppResult<Vec<Product>> {
        let mut found: Vec<Product> = Vec::with_capacity(ids.len());
        for id in ids {
            if found.iter().any(|p| p.id == *id) {
                continue;
            }
            if let Some(product) = self.records.get(*id)? {
                found.push(product);
            }
        }
        Ok(found)
    }

    async fn create(&self, data: CreateProduct) -> AppResult<Product> {
        let product = Product::from_request(data, Utc::now());
        self.records.write(|map| {
            map.insert(product.id, product.clone());
            Ok(())
        })?;
        Ok(product)
    }

    async fn update_quantity(&self, decrements: &[ProductQuantity]) -> AppResult<Vec<Product>> {
        let now = Utc::now();
        self.records.write(|map| {
            // Stage every change first so a shortfall leaves the catalog untouched.
            let mut staged: HashMap<ProductId, Product> = HashMap::new();
            let mut order: Vec<ProductId> = Vec::new();

            for entry in decrements {
                if !staged.contains_key(&entry.id) {
                    let current = map.get(&entry.id).cloned().ok_or(AppError::ProductNotFound)?;
                    staged.insert(entry.id, current);
                    order.push(entry.id);
                }
                if let Some(product) = staged.get_mut(&entry.id) {
                    product.take_stock(entry.quantity, now)?;
                }
            }

            let mut updated = Vec::with_capacity(order.len());
            for id in order {
                if let Some(product) = staged.remove(&id) {
                    map.insert(id, product.clone());
                    updated.push(product);
                }
            }
            Ok(updated)
        })
    }
}
