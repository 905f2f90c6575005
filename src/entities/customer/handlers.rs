//! Customer HTTP handlers

use super::model::{Customer, CustomerInput};
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

/// Customer-specific AppState
#[derive(Clone)]
pub struct CustomerAppState {
    pub repository: Arc<dyn Repository<Customer>>,
    pub events: EventBus,
    pub per_page: usize,
}

pub async fn list_customers(
    State(state): State<CustomerAppState>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<PaginatedResponse<Customer>>> {
    let page = state
        .repository
        .paginate(params.page(), state.per_page)
        .await?;
    Ok(Json(page.into_response()))
}

pub async fn create_customer(
    State(state): State<CustomerAppState>,
    ValidatedJson(input): ValidatedJson<CustomerInput>,
) -> ApiResult<(StatusCode, Json<DataResponse<Customer>>)> {
    let customer = state.repository.create(input.into_customer()).await?;
    tracing::info!(customer_id = customer.id, "customer created");
    state.events.entity_created(&customer);

    Ok((StatusCode::CREATED, Json(DataResponse::new(customer))))
}

pub async fn get_customer(
    State(state): State<CustomerAppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DataResponse<Customer>>> {
    let id = parse_id(&id)?;
    let customer = state.repository.get_by_id(id).await?;
    Ok(Json(DataResponse::new(customer)))
}
