//! HTTP API: routing, request validation and response mapping over the
//! order-management services.

pub mod app;
