use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use orderdesk_core::{CustomerId, Entity, OrderId, ProductId};
use orderdesk_customers::Customer;
use orderdesk_products::{merge_quantities, ProductQuantity, QuantityOverflow};

/// One product line of an order.
///
/// `price` is the unit price captured from the catalog when the order was
/// composed; later catalog changes do not affect it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub product_id: ProductId,
    pub quantity: i64,
    pub price: Decimal,
}

/// A placed order. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer: Customer,
    pub products: Vec<OrderLineItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn place(data: NewOrder, now: DateTime<Utc>) -> Self {
        Self {
            id: OrderId::new(),
            customer: data.customer,
            products: data.products,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Data handed to the order store once every check has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer: Customer,
    pub products: Vec<OrderLineItem>,
}

/// Request: compose an order for a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrder {
    pub customer_id: CustomerId,
    pub products: Vec<ProductQuantity>,
}

impl CreateOrder {
    /// Requested quantities summed per product id, in first-seen order.
    pub fn requested_quantities(&self) -> Result<Vec<ProductQuantity>, QuantityOverflow> {
        merge_quantities(&self.products)
    }

    /// Distinct requested product ids, in first-seen order.
    pub fn product_ids(&self) -> Vec<ProductId> {
        let mut ids: Vec<ProductId> = Vec::with_capacity(self.products.len());
        for entry in &self.products {
            if !ids.contains(&entry.id) {
                ids.push(entry.id);
            }
        }
        ids
    }
}

/// Request: look up an order by id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindOrder {
    pub id: OrderId,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: i64, price: Decimal) -> OrderLineItem {
        OrderLineItem {
            product_id: ProductId::new(),
            quantity,
            price,
        }
    }

    #[test]
    fn place_keeps_line_order_and_stamps_creation() {
        let now = Utc::now();
        let customer = Customer {
            id: CustomerId::new(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            created_at: now,
            updated_at: now,
        };
        let order = Order::place(
            NewOrder {
                customer,
                products: vec![line(2, Decimal::from(5)), line(3, Decimal::from(7))],
            },
            now,
        );

        assert_eq!(order.created_at, now);
        assert_eq!(order.updated_at, now);
        assert_eq!(order.products.len(), 2);
        assert_eq!(order.products[0].price, Decimal::from(5));
        assert_eq!(order.products[1].quantity, 3);
    }

    #[test]
    fn requested_quantities_merges_repeated_ids() {
        let a = ProductId::new();
        let b = ProductId::new();
        let request = CreateOrder {
            customer_id: CustomerId::new(),
            products: vec![
                ProductQuantity { id: a, quantity: 1 },
                ProductQuantity { id: b, quantity: 4 },
                ProductQuantity { id: a, quantity: 2 },
            ],
        };

        assert_eq!(request.product_ids(), vec![a, b]);
        assert_eq!(
            request.requested_quantities().unwrap(),
            vec![
                ProductQuantity { id: a, quantity: 3 },
                ProductQuantity { id: b, quantity: 4 },
            ]
        );
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: merging keeps one entry per id and preserves the total.
            #[test]
            fn merge_preserves_totals(picks in prop::collection::vec((0usize..4, 1i64..50), 0..20)) {
                let ids: Vec<ProductId> = (0..4).map(|_| ProductId::new()).collect();
                let request = CreateOrder {
                    customer_id: CustomerId::new(),
                    products: picks
                        .iter()
                        .map(|(i, q)| ProductQuantity { id: ids[*i], quantity: *q })
                        .collect(),
                };

                let merged = request.requested_quantities().unwrap();

                prop_assert_eq!(
                    merged.iter().map(|m| m.id).collect::<Vec<_>>(),
                    request.product_ids()
                );

                for m in &merged {
                    let expected: i64 = request
                        .products
                        .iter()
                        .filter(|p| p.id == m.id)
                        .map(|p| p.quantity)
                        .sum();
                    prop_assert_eq!(m.quantity, expected);
                }
            }
        }
    }
}
