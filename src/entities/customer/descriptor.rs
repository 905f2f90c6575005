//! Entity descriptor for Customer

use super::handlers::{CustomerAppState, create_customer, get_customer, list_customers};
use crate::server::EntityDescriptor;
use axum::{Router, routing::get};

/// Descriptor for the Customer entity
pub struct CustomerDescriptor {
    pub state: CustomerAppState,
}

impl CustomerDescriptor {
    pub fn new(state: CustomerAppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for CustomerDescriptor {
    fn entity_type(&self) -> &str {
        "customer"
    }

    fn plural(&self) -> &str {
        "customers"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/customers", get(list_customers).post(create_customer))
            .route("/customers/{id}", get(get_customer))
            .with_state(self.state.clone())
    }
}
