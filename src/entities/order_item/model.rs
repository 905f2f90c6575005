//! OrderItem entity and its input schema

use crate::core::entity::{Entity, EntityId};
use crate::core::field::FieldValue;
use crate::core::validation::{Sanitize, trim_in_place};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A line of an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: EntityId,
    pub order_id: EntityId,
    pub product: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderItem {
    pub fn new(order_id: EntityId, product: impl Into<String>, quantity: u32, unit_price: f64) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            order_id,
            product: product.into(),
            quantity,
            unit_price,
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for OrderItem {
    fn resource_name() -> &'static str {
        "order_items"
    }

    fn resource_name_singular() -> &'static str {
        "order_item"
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
            "id" => Some(FieldValue::from(self.id)),
            "order_id" => Some(FieldValue::from(self.order_id)),
            "product" => Some(FieldValue::from(self.product.as_str())),
            "quantity" => Some(FieldValue::Integer(i64::from(self.quantity))),
            _ => None,
        }
    }
}

/// Body of `POST /order-items`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderItemInput {
    #[validate(
        required(message = "is required"),
        range(min = 1, message = "must be a positive id")
    )]
    pub order_id: Option<EntityId>,

    #[validate(
        required(message = "is required"),
        length(min = 1, max = 255, message = "must be between 1 and 255 characters")
    )]
    pub product: Option<String>,

    #[validate(
        required(message = "is required"),
        range(min = 1, max = 10000, message = "must be between 1 and 10000")
    )]
    pub quantity: Option<u32>,

    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub unit_price: Option<f64>,
}

impl Sanitize for OrderItemInput {
    fn sanitize(&mut self) {
        if let Some(product) = self.product.as_mut() {
            trim_in_place(product);
        }
    }
}

impl OrderItemInput {
    pub fn into_item(self) -> OrderItem {
        OrderItem::new(
            self.order_id.unwrap_or_default(),
            self.product.unwrap_or_default(),
            self.quantity.unwrap_or(1),
            self.unit_price.unwrap_or(0.0),
        )
    }
}
