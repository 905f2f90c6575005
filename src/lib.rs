//! # Storefront
//!
//! A small order-management HTTP service: categories, customers, orders and
//! their items, exposed as a JSON REST API on axum.
//!
//! ## Features
//!
//! - **Order workflow**: orders move from `opened` to `checkout` only once
//!   they carry items, and the customer is notified on checkout
//! - **Validated input**: request bodies are sanitized and checked with
//!   `validator` before they reach a handler
//! - **Pluggable storage**: every entity sits behind a `Repository` trait,
//!   with an in-memory implementation
//! - **Decoupled notifications**: notifications travel over a broadcast
//!   event bus to a background mail dispatcher
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use storefront::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     ServerBuilder::new()
//!         .with_config(AppConfig::load()?)
//!         .serve()
//!         .await
//! }
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod notifications;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiError, ApiResult, DataResponse, DomainEvent, Entity, EntityEvent, EntityId, EventBus,
        FieldValue, Page, PaginatedResponse, QueryParams, Repository, Sanitize, ValidatedJson,
    };

    // === Entities ===
    pub use crate::entities::{Category, Customer, Order, OrderItem, OrderStatus};

    // === Notifications ===
    pub use crate::notifications::{
        EventBusNotifier, LogMailer, MailDispatcher, MailMessage, Mailer, Notification, Notifier,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryRepository, Repositories};

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
}
