//! Customers module: the customer record, its repository contract and the
//! directory service that registers customers.

pub mod customer;
pub mod directory;
pub mod repository;

pub use customer::{CreateCustomer, Customer};
pub use directory::CustomerDirectory;
pub use repository::CustomerRepository;
