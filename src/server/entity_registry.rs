//! Entity registry collecting the routes of every entity

use axum::Router;
use std::collections::BTreeMap;

/// Describes how an entity contributes routes to the application
pub trait EntityDescriptor: Send + Sync {
    /// Singular entity type, e.g. "order"
    fn entity_type(&self) -> &str;

    /// URL segment of the collection, e.g. "orders"
    fn plural(&self) -> &str;

    /// Routes of this entity, with their state already applied
    fn build_routes(&self) -> Router;
}

/// Registry of entity descriptors keyed by entity type
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor; a second registration for the same type replaces the first
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        tracing::debug!(entity_type = %entity_type, plural = descriptor.plural(), "registering entity routes");
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Merge the routes of every registered entity into one router
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    /// Registered entity types in name order
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }
}
