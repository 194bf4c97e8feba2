use tracing::instrument;

use orderdesk_core::AppResult;

use crate::order::{FindOrder, Order};
use crate::repository::OrderRepository;

/// Read-only order lookup. A missing order is `Ok(None)`, not an error.
pub struct OrderLookupService<O> {
    orders: O,
}

impl<O: OrderRepository> OrderLookupService<O> {
    pub fn new(orders: O) -> Self {
        Self { orders }
    }

    #[instrument(name = "orders.find", skip_all, fields(order_id = %request.id))]
    pub async fn find(&self, request: FindOrder) -> AppResult<Option<Order>> {
        let order = self.orders.find_by_id(request.id).await?;
        if order.is_none() {
            tracing::debug!("order not found");
        }
        Ok(order)
    }
}
