//! Category HTTP handlers
//!
//! Plain CRUD passthrough to the repository; the only side effect beyond
//! storage is an entity event on the bus.

use super::model::{Category, CategoryInput, CategoryPatch};
use crate::core::error::{ApiResult, parse_id};
use crate::core::events::EventBus;
use crate::core::query::{DataResponse, PaginatedResponse, QueryParams};
use crate::core::repository::Repository;
use crate::core::validation::ValidatedJson;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

/// Category-specific AppState
#[derive(Clone)]
pub struct CategoryAppState {
    pub repository: Arc<dyn Repository<Category>>,
    pub events: EventBus,
    pub per_page: usize,
}

/// GET /categories
pub async fn list_categories(
    State(state): State<CategoryAppState>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<PaginatedResponse<Category>>> {
    let page = state
        .repository
        .paginate(params.page(), state.per_page)
        .await?;
    Ok(Json(page.into_response()))
}

/// POST /categories
pub async fn create_category(
    State(state): State<CategoryAppState>,
    ValidatedJson(input): ValidatedJson<CategoryInput>,
) -> ApiResult<(StatusCode, Json<DataResponse<Category>>)> {
    let category = state.repository.create(input.into_category()).await?;
    tracing::info!(category_id = category.id, name = %category.name, "category created");
    state.events.entity_created(&category);

    Ok((StatusCode::CREATED, Json(DataResponse::new(category))))
}

/// GET /categories/{id}
pub async fn get_category(
    State(state): State<CategoryAppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Category>>> {
    let id = parse_id(&id)?;
    let category = state.repository.get_by_id(id).await?;
    Ok(Json(DataResponse::new(category)))
}

/// PUT/PATCH /categories/{id}
pub async fn update_category(
    State(state): State<CategoryAppState>,
    Path(id): Path<String>,
    ValidatedJson(patch): ValidatedJson<CategoryPatch>,
) -> ApiResult<Json<DataResponse<Category>>> {
    let id = parse_id(&id)?;

    let mut category = state.repository.get_by_id(id).await?;
    category.apply(patch);
    let category = state.repository.update(id, category).await?;

    tracing::info!(category_id = id, "category updated");
    state.events.entity_updated(&category);

    Ok(Json(DataResponse::new(category)))
}

/// DELETE /categories/{id}
pub async fn delete_category(
    State(state): State<CategoryAppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;

    state.repository.destroy(id).await?;
    tracing::info!(category_id = id, "category deleted");
    state.events.entity_deleted::<Category>(id);

    Ok(StatusCode::NO_CONTENT)
}
