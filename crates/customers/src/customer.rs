use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderdesk_core::{CustomerId, Entity};

/// A registered customer.
///
/// Immutable once created; the e-mail is unique across all customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Build a fresh record for a registration request.
    pub fn register(data: CreateCustomer, now: DateTime<Utc>) -> Self {
        Self {
            id: CustomerId::new(),
            name: data.name,
            email: data.email,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Request: register a new customer.
///
/// E-mail well-formedness is checked by the transport layer, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCustomer {
    pub name: String,
    pub email: String,
}
