//! Application error model.

use thiserror::Error;

/// Result type returned by every application service and repository.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error.
///
/// The taxonomy is flat: each variant renders the exact message a caller may
/// surface unchanged. Store failures share the same surface; callers do not
/// distinguish bad input from infrastructure trouble at this layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Another customer already uses the requested e-mail.
    #[error("E-mail already registered, try again!")]
    DuplicateEmail,

    /// The customer an order refers to does not exist.
    #[error("Customer not found!")]
    CustomerNotFound,

    /// At least one requested product id is unknown to the catalog.
    #[error("Products not found")]
    ProductsNotFound,

    /// A resolved product has no matching request entry.
    #[error("Product not found")]
    ProductNotFound,

    /// Requested quantity exceeds the product's current stock.
    #[error("Quantity {name} is not available")]
    InsufficientStock { name: String },

    /// An identifier failed to parse.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The backing store failed.
    #[error("store error: {0}")]
    Store(String),
}

impl AppError {
    pub fn insufficient_stock(name: impl Into<String>) -> Self {
        Self::InsufficientStock { name: name.into() }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Default status a transport layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::Store(_) => 500,
            _ => 400,
        }
    }
}
