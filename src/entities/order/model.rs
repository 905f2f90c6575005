//! Order entity, its status and input schemas

use crate::core::entity::{Entity, EntityId};
use crate::core::field::FieldValue;
use crate::core::validation::{Sanitize, rule_error, trim_in_place, trim_optional};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use validator::Validate;

/// Lifecycle of an order; `Checkout` is terminal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Opened,
    Checkout,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Opened => "opened",
            OrderStatus::Checkout => "checkout",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "opened" => Ok(OrderStatus::Opened),
            "checkout" => Ok(OrderStatus::Checkout),
            other => Err(format!("unknown order status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: EntityId,
    pub customer_id: EntityId,
    pub status: OrderStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// A fresh order always starts opened
    pub fn new(customer_id: EntityId, notes: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            customer_id,
            status: OrderStatus::Opened,
            notes,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_checked_out(&self) -> bool {
        self.status == OrderStatus::Checkout
    }
}

impl Entity for Order {
    fn resource_name() -> &'static str {
        "orders"
    }

    fn resource_name_singular() -> &'static str {
        "order"
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
            "customer_id" => Some(FieldValue::from(self.customer_id)),
            "status" => Some(FieldValue::from(self.status.as_str())),
            "notes" => Some(FieldValue::from(self.notes.clone())),
            _ => None,
        }
    }
}

/// Body of `POST /orders`
///
/// A `status` sent by the caller is not part of the schema and is dropped
/// during deserialization.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderStoreInput {
    #[validate(
        required(message = "is required"),
        range(min = 1, message = "must be a positive id")
    )]
    pub customer_id: Option<EntityId>,

    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub notes: Option<String>,
}

impl Sanitize for OrderStoreInput {
    fn sanitize(&mut self) {
        trim_optional(&mut self.notes);
    }
}

/// Body of `PUT/PATCH /orders/{id}`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderUpdateInput {
    #[validate(
        required(message = "is required"),
        custom(function = "checkout_only")
    )]
    pub status: Option<String>,

    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub notes: Option<String>,
}

impl Sanitize for OrderUpdateInput {
    fn sanitize(&mut self) {
        if let Some(status) = self.status.as_mut() {
            trim_in_place(status);
            status.make_ascii_lowercase();
        }
        trim_optional(&mut self.notes);
    }
}

impl OrderUpdateInput {
    /// Target status of the transition
    ///
    /// Validation restricts `status` to `checkout`, the only transition.
    pub fn target_status(&self) -> OrderStatus {
        OrderStatus::Checkout
    }
}

fn checkout_only(status: &str) -> Result<(), validator::ValidationError> {
    if status.parse::<OrderStatus>() == Ok(OrderStatus::Checkout) {
        Ok(())
    } else {
        Err(rule_error("status", "must be 'checkout'"))
    }
}
