//! Entity trait defining the core abstraction for all stored records

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Storage-assigned identifier shared by every entity
pub type EntityId = u64;

/// Base trait for all entities in the system.
///
/// All entities have:
/// - id: identifier assigned by the repository on create
/// - created_at: creation timestamp
/// - updated_at: last modification timestamp
///
/// Repositories own the identity and timestamp fields; callers build an
/// entity with placeholder values and receive the stored version back.
pub trait Entity: Clone + Serialize + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "orders", "categories")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "order", "category")
    fn resource_name_singular() -> &'static str;

    // === Core Entity Fields ===

    /// Get the identifier for this entity instance
    fn id(&self) -> EntityId;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Stamp identity and timestamps, called by the repository
    fn stamp(&mut self, id: EntityId, created_at: DateTime<Utc>, updated_at: DateTime<Utc>);

    // === Lookup ===

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    /// Field name and value that must be unique across the store, if any
    fn unique_key(&self) -> Option<(&'static str, String)> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, Serialize)]
    struct TestEntity {
        id: EntityId,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        label: String,
    }

    impl Entity for TestEntity {
        fn resource_name() -> &'static str {
            "test_entities"
        }

        fn resource_name_singular() -> &'static str {
            "test_entity"
        }

        fn id(&self) -> EntityId {
            self.id
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }

        fn updated_at(&self) -> DateTime<Utc> {
            self.updated_at
        }

        fn stamp(&mut self, id: EntityId, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) {
            self.id = id;
            self.created_at = created_at;
            self.updated_at = updated_at;
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "label" => Some(FieldValue::String(self.label.clone())),
                _ => None,
            }
        }
    }

    #[test]
    fn test_stamp_sets_identity() {
        let now = Utc::now();
        let mut entity = TestEntity {
            id: 0,
            created_at: now,
            updated_at: now,
            label: "x".to_string(),
        };
        let later = now + chrono::Duration::seconds(5);
        entity.stamp(7, now, later);

        assert_eq!(entity.id(), 7);
        assert_eq!(entity.updated_at(), later);
        assert!(entity.unique_key().is_none());
    }

    #[test]
    fn test_entity_metadata() {
        assert_eq!(TestEntity::resource_name(), "test_entities");
        assert_eq!(TestEntity::resource_name_singular(), "test_entity");
    }
}
