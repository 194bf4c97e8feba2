//! `orderdesk-core` — identifiers, errors and shared traits.
//!
//! No IO lives here; every other crate in the workspace builds on these types.

pub mod entity;
pub mod error;
pub mod id;

pub use entity::Entity;
pub use error::{AppError, AppResult};
pub use id::{CustomerId, OrderId, ProductId};
