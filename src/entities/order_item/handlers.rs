//! OrderItem HTTP handlers

use super::model::{OrderItem, OrderItemInput};
use crate::core::error::{ApiError, ApiResult, parse_id};
use crate::core::events::EventBus;
use crate::core::query::{DataResponse, PaginatedResponse, QueryParams};
use crate::core::repository::Repository;
use crate::core::validation::ValidatedJson;
use crate::entities::order::Order;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct OrderItemAppState {
    pub repository: Arc<dyn Repository<OrderItem>>,
    pub orders: Arc<dyn Repository<Order>>,
    pub events: EventBus,
    pub per_page: usize,
}

pub async fn list_items(
    State(state): State<OrderItemAppState>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<PaginatedResponse<OrderItem>>> {
    let page = state
        .repository
        .paginate(params.page(), state.per_page)
        .await?;
    Ok(Json(page.into_response()))
}

pub async fn create_item(
    State(state): State<OrderItemAppState>,
    ValidatedJson(input): ValidatedJson<OrderItemInput>,
) -> ApiResult<(StatusCode, Json<DataResponse<OrderItem>>)> {
    let order_id = input.order_id.unwrap_or_default();
    if state.orders.find(order_id).await?.is_none() {
        return Err(ApiError::invalid_field(
            "order_id",
            "The selected order does not exist.",
        ));
    }

    let item = state.repository.create(input.into_item()).await?;
    tracing::info!(item_id = item.id, order_id, product = %item.product, "order item created");
    state.events.entity_created(&item);

    Ok((StatusCode::CREATED, Json(DataResponse::new(item))))
}

pub async fn get_item(
    State(state): State<OrderItemAppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<OrderItem>>> {
    let id = parse_id(&id)?;
    let item = state.repository.get_by_id(id).await?;
    Ok(Json(DataResponse::new(item)))
}
