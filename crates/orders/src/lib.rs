//! Orders module: order records, the order repository contract and the two
//! order services (composition and lookup).

pub mod composition;
pub mod lookup;
pub mod order;
pub mod repository;

pub use composition::OrderCompositionService;
pub use lookup::OrderLookupService;
pub use order::{CreateOrder, FindOrder, NewOrder, Order, OrderLineItem};
pub use repository::OrderRepository;
