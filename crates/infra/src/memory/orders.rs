use async_trait::async_trait;
use chrono::Utc;

use orderdesk_core::{AppResult, OrderId};
use orderdesk_orders::{NewOrder, Order, OrderRepository};

use super::record_store::RecordStore;

/// In-memory order store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    records: RecordStore<Order>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> AppResult<usize> {
        self.records.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_by_id(&self, id: OrderId) -> AppResult<Option<Order>> {
        self.records.get(id)
    }

    async fn create(&self, data: NewOrder) -> AppResult<Order> {
        let order = Order::place(data, Utc::now());
        self.records.write(|map| {
            map.insert(order.id, order.clone());
            Ok(())
        })?;
        Ok(order)
    }
}
