//! Entity descriptor for OrderItem

use super::handlers::{OrderItemAppState, create_item, get_item, list_items};
use crate::server::EntityDescriptor;
use axum::{Router, routing::get};

pub struct OrderItemDescriptor {
    pub state: OrderItemAppState,
}

impl OrderItemDescriptor {
    pub fn new(state: OrderItemAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for OrderItemDescriptor {
    fn entity_type(&self) -> &str {
        "order_item"
    }

    fn plural(&self) -> &str {
        "order-items"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/order-items", get(list_items).post(create_item))
            .route("/order-items/{id}", get(get_item))
            .with_state(self.state.clone())
    }
}
