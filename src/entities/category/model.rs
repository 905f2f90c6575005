//! Category entity and its input schemas

use crate::core::entity::{Entity, EntityId};
use crate::core::field::FieldValue;
use crate::core::validation::{Sanitize, trim_in_place, trim_optional};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A product category; names are unique
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            name: name.into(),
            description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the fields present in a partial update
    pub fn apply(&mut self, patch: CategoryPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
    }
}

impl Entity for Category {
    fn resource_name() -> &'static str {
        "categories"
    }

    fn resource_name_singular() -> &'static str {
        "category"
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
            "description" => Some(FieldValue::from(self.description.clone())),
            _ => None,
        }
    }

    fn unique_key(&self) -> Option<(&'static str, String)> {
        Some(("name", self.name.clone()))
    }
}

/// Body of `POST /categories`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(
        required(message = "is required"),
        length(min = 1, max = 255, message = "must be between 1 and 255 characters")
    )]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: Option<String>,
}

impl Sanitize for CategoryInput {
    fn sanitize(&mut self) {
        if let Some(name) = self.name.as_mut() {
            trim_in_place(name);
        }
        trim_optional(&mut self.description);
    }
}

impl CategoryInput {
    pub fn into_category(self) -> Category {
        Category::new(self.name.unwrap_or_default(), self.description)
    }
}

/// Body of `PUT/PATCH /categories/{id}`; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CategoryPatch {
    #[validate(length(min = 1, max = 255, message = "must be between 1 and 255 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub description: Option<String>,
}

impl Sanitize for CategoryPatch {
    fn sanitize(&mut self) {
        if let Some(name) = self.name.as_mut() {
            trim_in_place(name);
        }
        trim_optional(&mut self.description);
    }
}
