//! Customer entity and its input schema

use crate::core::entity::{Entity, EntityId};
use crate::core::field::FieldValue;
use crate::core::validation::{Sanitize, trim_in_place};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A customer that places orders and receives notifications by e-mail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: EntityId,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Entity for Customer {
    fn resource_name() -> &'static str {
        "customers"
    }

    fn resource_name_singular() -> &'static str {
        "customer"
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
            "name" => Some(FieldValue::from(self.name.as_str())),
            "email" => Some(FieldValue::from(self.email.as_str())),
            _ => None,
        }
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("email", self.email.clone()))
    }
}

/// Body of `POST /customers`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CustomerInput {
    #[validate(
        required(message = "is required"),
        length(min = 1, max = 255, message = "must be between 1 and 255 characters")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "is required"),
        email(message = "must be a valid e-mail address")
    )]
    pub email: Option<String>,
}

impl Sanitize for CustomerInput {
    fn sanitize(&mut self) {
        if let Some(name) = self.name.as_mut() {
            trim_in_place(name);
        }
        if let Some(email) = self.email.as_mut() {
            trim_in_place(email);
            *email = email.to_lowercase();
        }
    }
}

impl CustomerInput {
    pub fn into_customer(self) -> Customer {
        Customer::new(self.name.unwrap_or_default(), self.email.unwrap_or_default())
    }
}
