//! Core module containing fundamental traits and types

pub mod entity;
pub mod error;
pub mod events;
pub mod field;
pub mod query;
pub mod repository;
pub mod validation;

pub use entity::{Entity, EntityId};
pub use error::{ApiError, ApiResult};
pub use events::{DomainEvent, EntityEvent, EventBus};
pub use field::FieldValue;
pub use query::{DataResponse, Page, PaginatedResponse, PaginationMeta, QueryParams};
pub use repository::Repository;
pub use validation::{Sanitize, ValidatedJson};
