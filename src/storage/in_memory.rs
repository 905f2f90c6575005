//! In-memory implementation of Repository for development and tests

use crate::core::entity::{Entity, EntityId};
use crate::core::error::{ApiError, ApiResult, EntityError, StorageError};
use crate::core::field::FieldValue;
use crate::core::query::Page;
use crate::core::repository::Repository;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory repository
///
/// Records are kept in id order, so listings come back oldest first. Ids
/// are never reused, even after a destroy.
pub struct InMemoryRepository<T: Entity> {
    records: Arc<RwLock<BTreeMap<EntityId, T>>>,
    next_id: Arc<AtomicU64>,
}

impl<T: Entity> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
            next_id: self.next_id.clone(),
        }
    }
}

impl<T: Entity> InMemoryRepository<T> {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    fn read(&self) -> ApiResult<RwLockReadGuard<'_, BTreeMap<EntityId, T>>> {
        self.records.read().map_err(|e| poisoned(e.to_string()))
    }

    fn write(&self) -> ApiResult<RwLockWriteGuard<'_, BTreeMap<EntityId, T>>> {
        self.records.write().map_err(|e| poisoned(e.to_string()))
    }

    fn check_unique(
        records: &BTreeMap<EntityId, T>,
        candidate: &T,
        ignore: Option<EntityId>,
    ) -> ApiResult<()> {
        let Some((field, value)) = candidate.unique_key() else {
            return Ok(());
        };

        let taken = records.values().any(|existing| {
            Some(existing.id()) != ignore
                && existing
                    .unique_key()
                    .is_some_and(|(_, other)| other == value)
        });

        if taken {
            return Err(EntityError::AlreadyExists {
                entity_type: T::resource_name_singular().to_string(),
                field: field.to_string(),
                value,
            }
            .into());
        }
        Ok(())
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned(message: String) -> ApiError {
    StorageError::LockPoisoned {
        backend: "in-memory".to_string(),
        message,
    }
    .into()
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn create(&self, mut entity: T) -> ApiResult<T> {
        let mut records = self.write()?;
        Self::check_unique(&records, &entity, None)?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        entity.stamp(id, now, now);
        records.insert(id, entity.clone());

        Ok(entity)
    }

    async fn find(&self, id: EntityId) -> ApiResult<Option<T>> {
        let records = self.read()?;
        Ok(records.get(&id).cloned())
    }

    async fn update(&self, id: EntityId, mut entity: T) -> ApiResult<T> {
        let mut records = self.write()?;

        let created_at = records
            .get(&id)
            .map(|existing| existing.created_at())
            .ok_or_else(|| ApiError::not_found(T::resource_name_singular(), id))?;
        Self::check_unique(&records, &entity, Some(id))?;

        entity.stamp(id, created_at, Utc::now());
        records.insert(id, entity.clone());

        Ok(entity)
    }

    async fn destroy(&self, id: EntityId) -> ApiResult<()> {
        let mut records = self.write()?;

        records
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ApiError::not_found(T::resource_name_singular(), id))
    }

    async fn paginate(&self, page: usize, per_page: usize) -> ApiResult<Page<T>> {
        let records = self.read()?;
        let page = page.max(1);
        let per_page = per_page.max(1);

        let items = records
            .values()
            .skip((page - 1).saturating_mul(per_page))
            .take(per_page)
            .cloned()
            .collect();

        Ok(Page {
            items,
            page,
            per_page,
            total: records.len(),
        })
    }

    async fn find_by_field(&self, field: &str, value: &FieldValue) -> ApiResult<Vec<T>> {
        let records = self.read()?;

        Ok(records
            .values()
            .filter(|record| record.field_value(field).as_ref() == Some(value))
            .cloned()
            .collect())
    }
}
