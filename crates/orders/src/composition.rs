//! Order composition: validate a request against live customer and catalog
//! state, then decrement stock and persist the order.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. the customer exists
//! 2. every requested product exists
//! 3. each resolved product has a request entry
//! 4. each resolved product has enough stock
//!
//! Nothing is written unless all four pass. The stock decrement and the order
//! insert are separate store calls; an order-store failure after a successful
//! decrement is surfaced as-is and leaves the stock reduced.

use tracing::instrument;

use orderdesk_core::{AppError, AppResult, ProductId};
use orderdesk_customers::CustomerRepository;
use orderdesk_products::{Product, ProductQuantity, ProductRepository};

use crate::order::{CreateOrder, NewOrder, Order, OrderLineItem};
use crate::repository::OrderRepository;

pub struct OrderCompositionService<C, P, O> {
    customers: C,
    products: P,
    orders: O,
}

impl<C, P, O> OrderCompositionService<C, P, O>
where
    C: CustomerRepository,
    P: ProductRepository,
    O: OrderRepository,
{
    pub fn new(customers: C, products: P, orders: O) -> Self {
        Self {
            customers,
            products,
            orders,
        }
    }

    #[instrument(name = "orders.create", skip_all, fields(customer_id = %request.customer_id))]
    pub async fn create(&self, request: CreateOrder) -> AppResult<Order> {
        let customer = self
            .customers
            .find_by_id(request.customer_id)
            .await?
            .ok_or(AppError::CustomerNotFound)?;

        let ids = request.product_ids();
        let catalog = self.products.find_all_by_ids(&ids).await?;

        if catalog.len() != ids.len() {
            tracing::warn!(
                requested = ids.len(),
                resolved = catalog.len(),
                "order references unknown products"
            );
            return Err(AppError::ProductsNotFound);
        }

        let requested = request
            .requested_quantities()
            .map_err(|overflow| shortfall(&catalog, overflow.id))?;
        let line_items = compose_line_items(&catalog, &requested)?;

        self.products.update_quantity(&request.products).await?;

        let order = self
            .orders
            .create(NewOrder {
                customer,
                products: line_items,
            })
            .await?;

        tracing::info!(
            order_id = %order.id,
            line_items = order.products.len(),
            "order created"
        );
        Ok(order)
    }
}

fn shortfall(catalog: &[Product], id: ProductId) -> AppError {
    catalog
        .iter()
        .find(|product| product.id == id)
        .map_or(AppError::ProductNotFound, |product| {
            AppError::insufficient_stock(&product.name)
        })
}

/// Pair each request entry with its resolved product.
///
/// Availability is checked against the catalog quantity just read, walking
/// the resolved products; line items follow request order.
fn compose_line_items(
    catalog: &[Product],
    requested: &[ProductQuantity],
) -> AppResult<Vec<OrderLineItem>> {
    for product in catalog {
        let entry = requested
            .iter()
            .find(|entry| entry.id == product.id)
            .ok_or(AppError::ProductNotFound)?;

        if !product.has_stock_for(entry.quantity) {
            return Err(AppError::insufficient_stock(&product.name));
        }
    }

    requested
        .iter()
        .map(|entry| {
            let product = catalog
                .iter()
                .find(|product| product.id == entry.id)
                .ok_or(AppError::ProductNotFound)?;

            Ok(OrderLineItem {
                product_id: product.id,
                quantity: entry.quantity,
                price: product.price,
            })
        })
        .collect()
}
