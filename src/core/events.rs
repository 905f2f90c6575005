//! Internal event system
//!
//! The EventBus decouples mutations (controller handlers) from side effects
//! that must not block a request, such as mail delivery.
//!
//! # Architecture
//!
//! ```text
//! Category/Order handlers ──▶ EventBus::publish() ──▶ broadcast channel ──▶ MailDispatcher
//!                                                                      ──▶ other subscribers
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let event_bus = EventBus::new(1024);
//! let mut rx = event_bus.subscribe();
//!
//! // Non-blocking, fire-and-forget
//! event_bus.publish(DomainEvent::Entity(EntityEvent::Deleted {
//!     entity_type: "category".to_string(),
//!     entity_id: 3,
//! }));
//!
//! if let Ok(envelope) = rx.recv().await {
//!     println!("Received: {:?}", envelope.event);
//! }
//! ```

use crate::core::entity::{Entity, EntityId};
use crate::notifications::Notification;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Events related to entity mutations (create, update, delete)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EntityEvent {
    /// An entity was created
    Created {
        entity_type: String,
        entity_id: EntityId,
        data: serde_json::Value,
    },
    /// An entity was updated
    Updated {
        entity_type: String,
        entity_id: EntityId,
        data: serde_json::Value,
    },
    /// An entity was deleted
    Deleted {
        entity_type: String,
        entity_id: EntityId,
    },
}

/// Top-level event carried by the bus
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DomainEvent {
    /// An entity mutation
    Entity(EntityEvent),
    /// A notification waiting for delivery
    Notification(Notification),
}

impl DomainEvent {
    pub fn event_kind(&self) -> &str {
        match self {
            DomainEvent::Entity(_) => "entity",
            DomainEvent::Notification(_) => "notification",
        }
    }

    /// Get the entity type this event relates to
    pub fn entity_type(&self) -> Option<&str> {
        match self {
            DomainEvent::Entity(
                EntityEvent::Created { entity_type, .. }
                | EntityEvent::Updated { entity_type, .. }
                | EntityEvent::Deleted { entity_type, .. },
            ) => Some(entity_type),
            DomainEvent::Notification(_) => None,
        }
    }

    /// Get the action name (created, updated, deleted, notify)
    pub fn action(&self) -> &str {
        match self {
            DomainEvent::Entity(EntityEvent::Created { .. }) => "created",
            DomainEvent::Entity(EntityEvent::Updated { .. }) => "updated",
            DomainEvent::Entity(EntityEvent::Deleted { .. }) => "deleted",
            DomainEvent::Notification(_) => "notify",
        }
    }
}

/// Envelope wrapping a domain event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the event occurred
    pub timestamp: DateTime<Utc>,
    /// The actual event
    pub event: DomainEvent,
}

impl EventEnvelope {
    pub fn new(event: DomainEvent) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone and shareable across tasks.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// The capacity determines how many events can be buffered before
    /// slow receivers start losing events (lagged).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish an event to all subscribers
    ///
    /// Never blocks and never fails. With no subscribers the event is
    /// dropped. Returns the number of receivers that will see the event.
    pub fn publish(&self, event: DomainEvent) -> usize {
        let envelope = EventEnvelope::new(event);
        tracing::debug!(
            event_id = %envelope.id,
            kind = envelope.event.event_kind(),
            action = envelope.event.action(),
            "publishing event"
        );
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Publish a `Created` event for an entity
    pub fn entity_created<T: Entity>(&self, entity: &T) -> usize {
        self.publish(DomainEvent::Entity(EntityEvent::Created {
            entity_type: T::resource_name_singular().to_string(),
            entity_id: entity.id(),
            data: serde_json::to_value(entity).unwrap_or(serde_json::Value::Null),
        }))
    }

    /// Publish an `Updated` event for an entity
    pub fn entity_updated<T: Entity>(&self, entity: &T) -> usize {
        self.publish(DomainEvent::Entity(EntityEvent::Updated {
            entity_type: T::resource_name_singular().to_string(),
            entity_id: entity.id(),
            data: serde_json::to_value(entity).unwrap_or(serde_json::Value::Null),
        }))
    }

    /// Publish a `Deleted` event for an entity id
    pub fn entity_deleted<T: Entity>(&self, id: EntityId) -> usize {
        self.publish(DomainEvent::Entity(EntityEvent::Deleted {
            entity_type: T::resource_name_singular().to_string(),
            entity_id: id,
        }))
    }

    /// Subscribe to events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    /// Get the current number of active subscribers
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entity_event_serialization() {
        let event = EntityEvent::Created {
            entity_type: "order".to_string(),
            entity_id: 4,
            data: json!({"status": "opened"}),
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["action"], "created");
        assert_eq!(json["entity_type"], "order");
        assert_eq!(json["entity_id"], 4);
    }

    #[test]
    fn test_domain_event_accessors() {
        let event = DomainEvent::Entity(EntityEvent::Deleted {
            entity_type: "category".to_string(),
            entity_id: 2,
        });
        assert_eq!(event.event_kind(), "entity");
        assert_eq!(event.entity_type(), Some("category"));
        assert_eq!(event.action(), "deleted");
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = EventBus::new(16);
        let count = bus.publish(DomainEvent::Entity(EntityEvent::Deleted {
            entity_type: "order".to_string(),
            entity_id: 1,
        }));
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_subscribe_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        assert_eq!(bus.receiver_count(), 1);

        bus.publish(DomainEvent::Entity(EntityEvent::Updated {
            entity_type: "order".to_string(),
            entity_id: 8,
            data: json!({}),
        }));

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.event.action(), "updated");
    }
}
