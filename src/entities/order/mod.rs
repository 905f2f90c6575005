//! Order entity module

pub mod descriptor;
pub mod handlers;
pub mod model;
pub mod workflow;

pub use descriptor::OrderDescriptor;
pub use handlers::OrderAppState;
pub use model::{Order, OrderStatus, OrderStoreInput, OrderUpdateInput};
pub use workflow::OrderWorkflow;
