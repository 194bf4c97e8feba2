//! Infrastructure layer: store configuration and repository adapters.

pub mod config;
pub mod memory;
pub mod postgres;

mod integration_tests;

pub use config::{ConfigError, StoreConfig};
