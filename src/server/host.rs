//! Server host holding the shared application state
//!
//! The host owns everything a request handler may reach: configuration,
//! repositories, the notifier and the event bus. It also wires the entity
//! descriptors into an [`EntityRegistry`] so the router can merge their
//! routes.

use crate::config::AppConfig;
use crate::core::events::EventBus;
use crate::entities::category::{CategoryAppState, CategoryDescriptor};
use crate::entities::customer::{CustomerAppState, CustomerDescriptor};
use crate::entities::order::{OrderAppState, OrderDescriptor, OrderWorkflow};
use crate::entities::order_item::{OrderItemAppState, OrderItemDescriptor};
use crate::notifications::Notifier;
use crate::server::entity_registry::EntityRegistry;
use crate::storage::Repositories;
use std::sync::Arc;

pub struct ServerHost {
    /// Effective configuration
    pub config: Arc<AppConfig>,

    /// Repository per entity
    pub repositories: Repositories,

    /// Where order notifications are handed off
    pub notifier: Arc<dyn Notifier>,

    /// Entity and notification events
    pub event_bus: EventBus,

    /// Entity registry for CRUD routes
    pub entity_registry: EntityRegistry,
}

impl ServerHost {
    /// Build the host and register every entity descriptor
    pub fn from_components(
        config: AppConfig,
        repositories: Repositories,
        notifier: Arc<dyn Notifier>,
        event_bus: EventBus,
    ) -> Self {
        let per_page = config.pagination.per_page();
        let mut entity_registry = EntityRegistry::new();

        entity_registry.register(Box::new(CategoryDescriptor::new(CategoryAppState {
            repository: repositories.categories.clone(),
            events: event_bus.clone(),
            per_page,
        })));

        entity_registry.register(Box::new(CustomerDescriptor::new(CustomerAppState {
            repository: repositories.customers.clone(),
            events: event_bus.clone(),
            per_page,
        })));

        entity_registry.register(Box::new(OrderItemDescriptor::new(OrderItemAppState {
            repository: repositories.order_items.clone(),
            orders: repositories.orders.clone(),
            events: event_bus.clone(),
            per_page,
        })));

        let workflow = OrderWorkflow::new(
            repositories.orders.clone(),
            repositories.order_items.clone(),
            repositories.customers.clone(),
            notifier.clone(),
            event_bus.clone(),
            per_page,
        );
        entity_registry.register(Box::new(OrderDescriptor::new(OrderAppState { workflow })));

        Self {
            config: Arc::new(config),
            repositories,
            notifier,
            event_bus,
            entity_registry,
        }
    }

    /// Get entity types registered in the host
    pub fn entity_types(&self) -> Vec<&str> {
        self.entity_registry.entity_types()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
