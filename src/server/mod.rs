//! HTTP server assembly
//!
//! `ServerBuilder` collects configuration, repositories and the mail
//! transport, builds a [`ServerHost`] and turns it into an axum `Router`.

pub mod builder;
pub mod entity_registry;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use host::ServerHost;
pub use router::build_router;
