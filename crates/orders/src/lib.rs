//! Orders domain module: shopping cart and order history.
//!
//! Deterministic domain logic only; placing and fetching orders is the
//! backend's business.

pub mod cart;
pub mod order;

pub use cart::{Cart, CartLine};
pub use order::{OrderHistory, OrderLine, OrderRecord, OrderStatus};
