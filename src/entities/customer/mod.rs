//! Customer entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::CustomerDescriptor;
pub use handlers::CustomerAppState;
pub use model::{Customer, CustomerInput};
