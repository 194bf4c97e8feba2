//! Composition root: picks repositories and wires them into the services.

use std::sync::Arc;

use orderdesk_core::AppResult;
use orderdesk_customers::{CustomerDirectory, CustomerRepository};
use orderdesk_infra::memory::{
    InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository,
};
use orderdesk_infra::postgres::{
    self, PostgresCustomerRepository, PostgresOrderRepository, PostgresProductRepository,
};
use orderdesk_infra::StoreConfig;
use orderdesk_orders::{OrderCompositionService, OrderLookupService, OrderRepository};
use orderdesk_products::ProductRepository;

pub type DynCustomers = Arc<dyn CustomerRepository>;
pub type DynProducts = Arc<dyn ProductRepository>;
pub type DynOrders = Arc<dyn OrderRepository>;

pub struct AppServices {
    pub customers: CustomerDirectory<DynCustomers>,
    pub orders: OrderCompositionService<DynCustomers, DynProducts, DynOrders>,
    pub lookup: OrderLookupService<DynOrders>,
    /// Direct catalog access for seeding and reading products.
    pub catalog: DynProducts,
}

impl AppServices {
    pub fn from_repositories(customers: DynCustomers, products: DynProducts, orders: DynOrders) -> Self {
        Self {
            customers: CustomerDirectory::new(customers.clone()),
            orders: OrderCompositionService::new(customers, products.clone(), orders.clone()),
            lookup: OrderLookupService::new(orders),
            catalog: products,
        }
    }
}

pub async fn build_services(config: &StoreConfig) -> AppResult<AppServices> {
    if config.persistent {
        return build_persistent_services(config).await;
    }
    Ok(build_in_memory_services())
}

pub fn build_in_memory_services() -> AppServices {
    tracing::info!("using in-memory stores");
    AppServices::from_repositories(
        Arc::new(InMemoryCustomerRepository::new()),
        Arc::new(InMemoryProductRepository::new()),
        Arc::new(InMemoryOrderRepository::new()),
    )
}

async fn build_persistent_services(config: &StoreConfig) -> AppResult<AppServices> {
    let pool = postgres::connect(config).await?;
    postgres::ensure_schema(&pool).await?;
    tracing::info!("using postgres stores");

    Ok(AppServices::from_repositories(
        Arc::new(PostgresCustomerRepository::new(pool.clone())),
        Arc::new(PostgresProductRepository::new(pool.clone())),
        Arc::new(PostgresOrderRepository::new(pool)),
    ))
}
