use tracing::instrument;

use orderdesk_core::{AppError, AppResult};

use crate::customer::{CreateCustomer, Customer};
use crate::repository::CustomerRepository;

/// Registers customers, keeping e-mails unique.
///
/// The uniqueness check and the insert are two separate store calls; a
/// concurrent registration with the same e-mail can slip between them unless
/// the store itself enforces uniqueness.
pub struct CustomerDirectory<R> {
    customers: R,
}

impl<R: CustomerRepository> CustomerDirectory<R> {
    pub fn new(customers: R) -> Self {
        Self { customers }
    }

    #[instrument(name = "customers.create", skip_all)]
    pub async fn create(&self, data: CreateCustomer) -> AppResult<Customer> {
        if self.customers.find_by_email(&data.email).await?.is_some() {
            tracing::warn!("e-mail already registered");
            return Err(AppError::DuplicateEmail);
        }

        let customer = self.customers.create(data).await?;
        tracing::info!(customer_id = %customer.id, "customer created");
        Ok(customer)
    }
}
