//! In-memory repositories (dev/test). Each store guards its records with a
//! single `RwLock`.

mod customers;
mod orders;
mod products;
mod record_store;

pub use customers::InMemoryCustomerRepository;
pub use orders::InMemoryOrderRepository;
pub use products::InMemoryProductRepository;
pub use record_store::RecordStore;
