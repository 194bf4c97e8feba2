//! Products module: catalog records and the repository contract used to
//! resolve products and decrement their stock.

pub mod product;
pub mod repository;

pub use product::{
    merge_quantities, CreateProduct, Product, ProductQuantity, QuantityOverflow,
};
pub use repository::ProductRepository;
