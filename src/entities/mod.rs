//! Storefront entities
//!
//! Each entity lives in its own module with a `model` (entity plus input
//! schemas), `handlers` (axum handlers and their state) and a `descriptor`
//! that registers its routes with the [`EntityRegistry`](crate::server::EntityRegistry).

pub mod category;
pub mod customer;
pub mod order;
pub mod order_item;

pub use category::Category;
pub use customer::Customer;
pub use order::{Order, OrderStatus};
pub use order_item::OrderItem;
