use async_trait::async_trait;
use chrono::Utc;

use orderdesk_core::{AppError, AppResult, CustomerId};
use orderdesk_customers::{CreateCustomer, Customer, CustomerRepository};

use super::record_store::RecordStore;

/// In-memory customer store for tests/dev.
///
/// Rejects a second customer with the same e-mail at insert time, the way a
/// unique index would.
#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    records: RecordStore<Customer>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> AppResult<usize> {
        self.records.len()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: CustomerId) -> AppResult<Option<Customer>> {
        self.records.get(id)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Customer>> {
        self.records.find(|customer| customer.email == email)
    }

    async fn create(&self, data: CreateCustomer) -> AppResult<Customer> {
        self.records.write(|map| {
            if map.values().any(|existing| existing.email == data.email) {
                return Err(AppError::DuplicateEmail);
            }
            let customer = Customer::register(data, Utc::now());
            map.insert(customer.id, customer.clone());
            Ok(customer)
        })
    }
}
