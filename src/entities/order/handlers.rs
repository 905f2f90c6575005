//! Order HTTP handlers
//!
//! Thin adapters over [`OrderWorkflow`]; business-rule failures come back
//! as `400 {"message": ...}` through `ApiError`.

use super::model::{Order, OrderStoreInput, OrderUpdateInput};
use super::workflow::OrderWorkflow;
use crate::core::error::{ApiResult, parse_id};
use crate::core::query::{DataResponse, PaginatedResponse, QueryParams};
use crate::core::validation::ValidatedJson;
use crate::entities::order_item::OrderItem;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};

/// Order-specific AppState
#[derive(Clone)]
pub struct OrderAppState {
    pub workflow: OrderWorkflow,
}

/// GET /orders
pub async fn list_orders(
    State(state): State<OrderAppState>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<PaginatedResponse<Order>>> {
    let page = state.workflow.list(params.page()).await?;
    Ok(Json(page.into_response()))
}

/// POST /orders
pub async fn create_order(
    State(state): State<OrderAppState>,
    ValidatedJson(input): ValidatedJson<OrderStoreInput>,
) -> ApiResult<(StatusCode, Json<DataResponse<Order>>)> {
    let order = state.workflow.create(input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse::new(order))))
}

/// GET /orders/{id}
pub async fn get_order(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Order>>> {
    let id = parse_id(&id)?;
    let order = state.workflow.get(id).await?;
    Ok(Json(DataResponse::new(order)))
}

/// PUT/PATCH /orders/{id}
pub async fn update_order(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
    ValidatedJson(input): ValidatedJson<OrderUpdateInput>,
) -> ApiResult<Json<DataResponse<Order>>> {
    let id = parse_id(&id)?;
    let order = state.workflow.update(id, input).await?;
    Ok(Json(DataResponse::new(order)))
}

/// DELETE /orders/{id}
pub async fn delete_order(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    state.workflow.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /orders/{id}/items
pub async fn list_order_items(
    State(state): State<OrderAppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Vec<OrderItem>>>> {
    let id = parse_id(&id)?;
    let items = state.workflow.items_of(id).await?;
    Ok(Json(DataResponse::new(items)))
}
