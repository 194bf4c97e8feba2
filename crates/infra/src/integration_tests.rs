//! Service-level tests over the in-memory repositories.
//!
//! Covers customer registration, order composition (happy path and every
//! rejection) and order lookup, checking store state after each call.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use rust_decimal::Decimal;

    use orderdesk_core::{AppError, AppResult, CustomerId, OrderId, ProductId};
    use orderdesk_customers::{CreateCustomer, Customer, CustomerDirectory, CustomerRepository};
    use orderdesk_orders::{
        CreateOrder, FindOrder, OrderCompositionService, OrderLineItem, OrderLookupService,
    };
    use orderdesk_products::{CreateProduct, Product, ProductQuantity, ProductRepository};

    use crate::memory::{InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository};

    /// Product store wrapper that counts every call reaching the catalog.
    #[derive(Default)]
    struct CountingProducts {
        inner: InMemoryProductRepository,
        calls: AtomicUsize,
        decrements: AtomicUsize,
    }

    #[async_trait]
    impl ProductRepository for CountingProducts {
        async fn find_by_id(&self, id: ProductId) -> AppResult<Option<Product>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_id(id).await
        }

        async fn find_all_by_ids(&self, ids: &[ProductId]) -> AppResult<Vec<Product>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find_all_by_ids(ids).await
        }

        async fn create(&self, data: CreateProduct) -> AppResult<Product> {
            self.inner.create(data).await
        }

        async fn update_quantity(&self, decrements: &[ProductQuantity]) -> AppResult<Vec<Product>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.decrements.fetch_add(1, Ordering::SeqCst);
            self.inner.update_quantity(decrements).await
        }
    }

    struct Fixture {
        customers: Arc<InMemoryCustomerRepository>,
        products: Arc<CountingProducts>,
        orders: Arc<InMemoryOrderRepository>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                customers: Arc::new(InMemoryCustomerRepository::new()),
                products: Arc::new(CountingProducts::default()),
                orders: Arc::new(InMemoryOrderRepository::new()),
            }
        }

        fn directory(&self) -> CustomerDirectory<Arc<InMemoryCustomerRepository>> {
            CustomerDirectory::new(self.customers.clone())
        }

        fn composer(
            &self,
        ) -> OrderCompositionService<
            Arc<InMemoryCustomerRepository>,
            Arc<CountingProducts>,
            Arc<InMemoryOrderRepository>,
        > {
            OrderCompositionService::new(
                self.customers.clone(),
                self.products.clone(),
                self.orders.clone(),
            )
        }

        fn lookup(&self) -> OrderLookupService<Arc<InMemoryOrderRepository>> {
            OrderLookupService::new(self.orders.clone())
        }

        async fn customer(&self) -> Customer {
            self.directory()
                .create(CreateCustomer {
                    name: "Ada Lovelace".to_string(),
                    email: "ada@example.com".to_string(),
                })
                .await
                .unwrap()
        }

        async fn product(&self, name: &str, price: i64, quantity: i64) -> Product {
            self.products
                .create(CreateProduct {
                    name: name.to_string(),
                    price: Decimal::from(price),
                    quantity,
                })
                .await
                .unwrap()
        }

        async fn stock(&self, id: ProductId) -> i64 {
            self.products.inner.find_by_id(id).await.unwrap().unwrap().quantity
        }
    }

    fn want(product: &Product, quantity: i64) -> ProductQuantity {
        ProductQuantity {
            id: product.id,
            quantity,
        }
    }

    #[tokio::test]
    async fn fresh_email_registers_customer() {
        let fx = Fixture::new();

        let customer = fx.customer().await;

        assert_eq!(customer.name, "Ada Lovelace");
        assert_eq!(
            fx.customers.find_by_email("ada@example.com").await.unwrap(),
            Some(customer)
        );
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_without_write() {
        let fx = Fixture::new();
        fx.customer().await;

        let err = fx
            .directory()
            .create(CreateCustomer {
                name: "Someone Else".to_string(),
                email: "ada@example.com".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err, AppError::DuplicateEmail);
        assert_eq!(err.to_string(), "E-mail already registered, try again!");
        assert_eq!(fx.customers.count().unwrap(), 1);
    }

    #[tokio::test]
    async fn valid_order_captures_prices_and_decrements_stock() {
        let fx = Fixture::new();
        let customer = fx.customer().await;
        let p1 = fx.product("Mouse", 5, 10).await;
        let p2 = fx.product("Cable", 7, 3).await;

        let order = fx
            .composer()
            .create(CreateOrder {
                customer_id: customer.id,
                products: vec![want(&p1, 2), want(&p2, 3)],
            })
            .await
            .unwrap();

        assert_eq!(order.customer, customer);
        assert_eq!(
            order.products,
            vec![
                OrderLineItem {
                    product_id: p1.id,
                    quantity: 2,
                    price: Decimal::from(5),
                },
                OrderLineItem {
                    product_id: p2.id,
                    quantity: 3,
                    price: Decimal::from(7),
                },
            ]
        );
        assert_eq!(fx.stock(p1.id).await, 8);
        assert_eq!(fx.stock(p2.id).await, 0);
        assert_eq!(fx.orders.count().unwrap(), 1);
    }

    #[tokio::test]
    async fn unknown_customer_fails_before_touching_catalog() {
        let fx = Fixture::new();
        let p1 = fx.product("Mouse", 5, 10).await;

        let err = fx
            .composer()
            .create(CreateOrder {
                customer_id: CustomerId::new(),
                products: vec![want(&p1, 1)],
            })
            .await
            .unwrap_err();

        assert_eq!(err, AppError::CustomerNotFound);
        assert_eq!(fx.products.calls.load(Ordering::SeqCst), 0);
        assert_eq!(fx.orders.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn unknown_product_rejects_whole_order() {
        let fx = Fixture::new();
        let customer = fx.customer().await;
        let p1 = fx.product("Mouse", 5, 10).await;

        let err = fx
            .composer()
            .create(CreateOrder {
                customer_id: customer.id,
                products: vec![
                    want(&p1, 1),
                    ProductQuantity {
                        id: ProductId::new(),
                        quantity: 1,
                    },
                ],
            })
            .await
            .unwrap_err();

        assert_eq!(err, AppError::ProductsNotFound);
        assert_eq!(fx.products.decrements.load(Ordering::SeqCst), 0);
        assert_eq!(fx.stock(p1.id).await, 10);
        assert_eq!(fx.orders.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn insufficient_stock_decrements_nothing() {
        let fx = Fixture::new();
        let customer = fx.customer().await;
        let p1 = fx.product("Mouse", 5, 10).await;
        let p2 = fx.product("Cable", 7, 3).await;

        let err = fx
            .composer()
            .create(CreateOrder {
                customer_id: customer.id,
                products: vec![want(&p1, 2), want(&p2, 4)],
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Quantity Cable is not available");
        assert_eq!(fx.products.decrements.load(Ordering::SeqCst), 0);
        assert_eq!(fx.stock(p1.id).await, 10);
        assert_eq!(fx.stock(p2.id).await, 3);
        assert_eq!(fx.orders.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn repeated_product_ids_are_checked_against_combined_quantity() {
        let fx = Fixture::new();
        let customer = fx.customer().await;
        let p1 = fx.product("Mouse", 5, 4).await;

        let err = fx
            .composer()
            .create(CreateOrder {
                customer_id: customer.id,
                products: vec![want(&p1, 3), want(&p1, 2)],
            })
            .await
            .unwrap_err();
        assert_eq!(err, AppError::insufficient_stock("Mouse"));
        assert_eq!(fx.stock(p1.id).await, 4);

        let order = fx
            .composer()
            .create(CreateOrder {
                customer_id: customer.id,
                products: vec![want(&p1, 1), want(&p1, 2)],
            })
            .await
            .unwrap();
        assert_eq!(order.products.len(), 1);
        assert_eq!(order.products[0].quantity, 3);
        assert_eq!(fx.stock(p1.id).await, 1);
    }

    #[tokio::test]
    async fn overflowing_combined_quantity_is_a_shortfall() {
        let fx = Fixture::new();
        let customer = fx.customer().await;
        let p1 = fx.product("Mouse", 5, 5).await;

        let err = fx
            .composer()
            .create(CreateOrder {
                customer_id: customer.id,
                products: vec![want(&p1, i64::MAX), want(&p1, i64::MAX)],
            })
            .await
            .unwrap_err();

        assert_eq!(err, AppError::insufficient_stock("Mouse"));
        assert_eq!(fx.products.decrements.load(Ordering::SeqCst), 0);
        assert_eq!(fx.stock(p1.id).await, 5);
        assert_eq!(fx.orders.count().unwrap(), 0);
    }

    #[tokio::test]
    async fn later_stock_changes_do_not_alter_placed_order() {
        let fx = Fixture::new();
        let customer = fx.customer().await;
        let p1 = fx.product("Mouse", 5, 10).await;

        let order = fx
            .composer()
            .create(CreateOrder {
                customer_id: customer.id,
                products: vec![want(&p1, 1)],
            })
            .await
            .unwrap();

        fx.products.inner.update_quantity(&[want(&p1, 9)]).await.unwrap();

        let found = fx.lookup().find(FindOrder { id: order.id }).await.unwrap().unwrap();
        assert_eq!(found.products[0].price, Decimal::from(5));
        assert_eq!(found.products[0].quantity, 1);
    }

    #[tokio::test]
    async fn lookup_of_unknown_order_is_absent() {
        let fx = Fixture::new();

        let found = fx.lookup().find(FindOrder { id: OrderId::new() }).await.unwrap();

        assert_eq!(found, None);
    }

    #[tokio::test]
    async fn repeated_lookup_returns_equal_data() {
        let fx = Fixture::new();
        let customer = fx.customer().await;
        let p1 = fx.product("Mouse", 5, 10).await;
        let order = fx
            .composer()
            .create(CreateOrder {
                customer_id: customer.id,
                products: vec![want(&p1, 2)],
            })
            .await
            .unwrap();

        let first = fx.lookup().find(FindOrder { id: order.id }).await.unwrap();
        let second = fx.lookup().find(FindOrder { id: order.id }).await.unwrap();

        assert_eq!(first, Some(order));
        assert_eq!(first, second);
    }
}
