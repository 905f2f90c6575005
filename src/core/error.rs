//! Typed error handling for the storefront service
//!
//! Every controller and repository operation returns [`ApiResult`]. The
//! top-level [`ApiError`] knows its HTTP status and error code and renders
//! itself as a JSON response, so handlers can simply use `?`.
//!
//! # Error Categories
//!
//! - [`EntityError`]: missing or conflicting entities
//! - [`ValidationError`]: malformed input, raised before controller logic
//! - [`RuleViolation`]: business-rule rejections of the order workflow
//! - [`StorageError`]: repository backend failures
//! - [`RequestError`]: malformed request paths
//! - [`NotificationError`]: the notifier refused a notification
//!
//! Rule violations render as `{"message": "..."}` with status 400. Every
//! other error renders as [`ErrorResponse`].

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

use crate::core::entity::EntityId;

/// The main error type of the service
#[derive(Debug)]
pub enum ApiError {
    /// Entity-related errors (CRUD operations)
    Entity(EntityError),

    /// Input validation errors
    Validation(ValidationError),

    /// Business-rule violations
    Rule(RuleViolation),

    /// Storage backend errors
    Storage(StorageError),

    /// HTTP/Request errors
    Request(RequestError),

    /// Notification hand-off errors
    Notification(NotificationError),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Entity(e) => write!(f, "{}", e),
            ApiError::Validation(e) => write!(f, "{}", e),
            ApiError::Rule(e) => write!(f, "{}", e),
            ApiError::Storage(e) => write!(f, "{}", e),
            ApiError::Request(e) => write!(f, "{}", e),
            ApiError::Notification(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Entity(e) => Some(e),
            ApiError::Validation(e) => Some(e),
            ApiError::Rule(e) => Some(e),
            ApiError::Storage(e) => Some(e),
            ApiError::Request(e) => Some(e),
            ApiError::Notification(e) => Some(e),
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Entity(e) => e.status_code(),
            ApiError::Validation(e) => e.status_code(),
            ApiError::Rule(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Request(_) => StatusCode::BAD_REQUEST,
            ApiError::Notification(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Entity(e) => e.error_code(),
            ApiError::Validation(e) => e.error_code(),
            ApiError::Rule(e) => e.error_code(),
            ApiError::Storage(_) => "STORAGE_ERROR",
            ApiError::Request(_) => "INVALID_ENTITY_ID",
            ApiError::Notification(_) => "NOTIFICATION_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Shorthand for a missing entity
    pub fn not_found(entity_type: &str, id: EntityId) -> Self {
        ApiError::Entity(EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id,
        })
    }

    /// Shorthand for a single-field validation failure
    pub fn invalid_field(field: &str, message: impl Into<String>) -> Self {
        ApiError::Validation(ValidationError::FieldErrors(vec![FieldValidationError {
            field: field.to_string(),
            message: message.into(),
        }]))
    }

    /// True when this error is a missing-entity error
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Entity(EntityError::NotFound { .. }))
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id
                }))
            }
            ApiError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Rule(rule) => {
                (status, Json(serde_json::json!({ "message": rule.to_string() }))).into_response()
            }
            other => {
                if status.is_server_error() {
                    tracing::error!(code = other.error_code(), error = %other, "request failed");
                }
                (status, Json(other.to_response())).into_response()
            }
        }
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity operations
#[derive(Debug, thiserror::Error)]
pub enum EntityError {
    /// Entity was not found
    #[error("{entity_type} with id '{id}' not found")]
    NotFound { entity_type: String, id: EntityId },

    /// A unique key is already taken by another record
    #[error("{entity_type} with {field} '{value}' already exists")]
    AlreadyExists {
        entity_type: String,
        field: String,
        value: String,
    },
}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
            EntityError::AlreadyExists { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
            EntityError::AlreadyExists { .. } => "ENTITY_ALREADY_EXISTS",
        }
    }
}

impl From<EntityError> for ApiError {
    fn from(err: EntityError) -> Self {
        ApiError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// One or more fields failed their rules
    #[error("Validation errors: {}", join_field_errors(.0))]
    FieldErrors(Vec<FieldValidationError>),

    /// Body is not valid JSON or does not match the input shape
    #[error("Invalid JSON: {message}")]
    InvalidJson { message: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

fn join_field_errors(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ValidationError::FieldErrors(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ValidationError::InvalidJson { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::FieldErrors(_) => "VALIDATION_ERROR",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        // HashMap iteration order is unstable
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

// =============================================================================
// Business-rule violations
// =============================================================================

/// Guard rules of the order workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuleViolation {
    #[error("The order has no items yet.")]
    OrderHasNoItems,

    #[error("The order is already on checkout.")]
    OrderAlreadyCheckedOut,

    #[error("The order has items and cannot be destroyed.")]
    OrderHasItems,
}

impl RuleViolation {
    pub fn error_code(&self) -> &'static str {
        match self {
            RuleViolation::OrderHasNoItems => "ORDER_HAS_NO_ITEMS",
            RuleViolation::OrderAlreadyCheckedOut => "ORDER_ALREADY_CHECKED_OUT",
            RuleViolation::OrderHasItems => "ORDER_HAS_ITEMS",
        }
    }
}

impl From<RuleViolation> for ApiError {
    fn from(err: RuleViolation) -> Self {
        ApiError::Rule(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A lock guarding the store was poisoned by a panicking writer
    #[error("{backend} store lock poisoned: {message}")]
    LockPoisoned { backend: String, message: String },
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Storage(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Path id is not a positive integer
    #[error("Invalid entity ID format: '{id}'")]
    InvalidEntityId { id: String },
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::Request(err)
    }
}

// =============================================================================
// Notification Errors
// =============================================================================

/// Errors raised while handing a notification to its delivery channel
#[derive(Debug, thiserror::Error)]
pub enum NotificationError {
    #[error("Notification channel '{channel}' rejected the message: {message}")]
    Rejected { channel: String, message: String },
}

impl From<NotificationError> for ApiError {
    fn from(err: NotificationError) -> Self {
        ApiError::Notification(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Validation(ValidationError::InvalidJson {
            message: err.to_string(),
        })
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.into())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for storefront operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Parse a path segment into an entity id
pub fn parse_id(raw: &str) -> ApiResult<EntityId> {
    raw.parse::<EntityId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            ApiError::Request(RequestError::InvalidEntityId {
                id: raw.to_string(),
            })
        })
}
