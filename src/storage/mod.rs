//! Storage implementations

pub mod in_memory;

pub use in_memory::InMemoryRepository;

use crate::core::repository::Repository;
use crate::entities::{Category, Customer, Order, OrderItem};
use std::sync::Arc;

/// One repository per entity, shared by every handler
#[derive(Clone)]
pub struct Repositories {
    pub categories: Arc<dyn Repository<Category>>,
    pub orders: Arc<dyn Repository<Order>>,
    pub order_items: Arc<dyn Repository<OrderItem>>,
    pub customers: Arc<dyn Repository<Customer>>,
}

impl Repositories {
    /// Fresh, empty in-memory repositories
    pub fn in_memory() -> Self {
        Self {
            categories: Arc::new(InMemoryRepository::<Category>::new()),
            orders: Arc::new(InMemoryRepository::<Order>::new()),
            order_items: Arc::new(InMemoryRepository::<OrderItem>::new()),
            customers: Arc::new(InMemoryRepository::<Customer>::new()),
        }
    }
}

impl Default for Repositories {
    fn default() -> Self {
        Self::in_memory()
    }
}
