//! Repository trait for entity persistence

use crate::core::entity::{Entity, EntityId};
use crate::core::error::{ApiError, ApiResult};
use crate::core::field::FieldValue;
use crate::core::query::Page;
use async_trait::async_trait;

/// Storage abstraction for one entity type
///
/// Implementations provide CRUD and lookup operations. The workflow code is
/// agnostic to the underlying storage mechanism; each call is atomic on its
/// own, but no multi-call transactions are offered.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Persist a new entity, assigning its id and timestamps
    async fn create(&self, entity: T) -> ApiResult<T>;

    /// Get an entity by id, `None` when absent
    async fn find(&self, id: EntityId) -> ApiResult<Option<T>>;

    /// Replace an existing entity, refreshing `updated_at`
    async fn update(&self, id: EntityId, entity: T) -> ApiResult<T>;

    /// Delete an entity
    async fn destroy(&self, id: EntityId) -> ApiResult<()>;

    /// Fetch one page in storage order
    async fn paginate(&self, page: usize, per_page: usize) -> ApiResult<Page<T>>;

    /// Find entities whose field equals the given value
    async fn find_by_field(&self, field: &str, value: &FieldValue) -> ApiResult<Vec<T>>;

    /// Get an entity by id, failing with `NotFound` when absent
    async fn get_by_id(&self, id: EntityId) -> ApiResult<T> {
        self.find(id)
            .await?
            .ok_or_else(|| ApiError::not_found(T::resource_name_singular(), id))
    }

    /// First entity whose field equals the given value
    async fn first_where(&self, field: &str, value: &FieldValue) -> ApiResult<Option<T>> {
        Ok(self.find_by_field(field, value).await?.into_iter().next())
    }

    /// Whether any entity has the given field value
    async fn exists_where(&self, field: &str, value: &FieldValue) -> ApiResult<bool> {
        Ok(self.first_where(field, value).await?.is_some())
    }
}
