//! Typed error handling for suitcut
//!
//! Store operations stay forgiving (a lookup miss is a no-op), but every
//! outcome that reaches the HTTP surface is expressed through this hierarchy
//! so clients can match on specific cases.
//!
//! # Error Categories
//!
//! - [`OrderError`]: order lookups
//! - [`AgentError`]: agent lookups and selection
//! - [`TransitionError`]: status changes the pipeline does not allow
//! - [`ValidationError`]: input validation
//! - [`ConfigError`]: configuration loading and context wiring
//! - [`StorageError`]: in-memory store failures
//! - [`RequestError`]: malformed HTTP requests
//!
//! # Example
//!
//! ```rust,ignore
//! match orders.advance(&id).await {
//!     Ok(Some(order)) => println!("now {}", order.status()),
//!     Ok(None) => println!("no such order"),
//!     Err(SuitcutError::Transition(TransitionError::NotAllowed { from, .. })) => {
//!         println!("{} is terminal", from);
//!     }
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::core::status::OrderStatus;

/// The main error type for suitcut
#[derive(Debug)]
pub enum SuitcutError {
    /// Order-related errors
    Order(OrderError),

    /// Agent-related errors
    Agent(AgentError),

    /// Status changes outside the pipeline's transition table
    Transition(TransitionError),

    /// Validation errors
    Validation(ValidationError),

    /// Configuration errors
    Config(ConfigError),

    /// Storage errors
    Storage(StorageError),

    /// HTTP/Request errors
    Request(RequestError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for SuitcutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuitcutError::Order(e) => write!(f, "{}", e),
            SuitcutError::Agent(e) => write!(f, "{}", e),
            SuitcutError::Transition(e) => write!(f, "{}", e),
            SuitcutError::Validation(e) => write!(f, "{}", e),
            SuitcutError::Config(e) => write!(f, "{}", e),
            SuitcutError::Storage(e) => write!(f, "{}", e),
            SuitcutError::Request(e) => write!(f, "{}", e),
            SuitcutError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for SuitcutError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SuitcutError::Order(e) => Some(e),
            SuitcutError::Agent(e) => Some(e),
            SuitcutError::Transition(e) => Some(e),
            SuitcutError::Validation(e) => Some(e),
            SuitcutError::Config(e) => Some(e),
            SuitcutError::Storage(e) => Some(e),
            SuitcutError::Request(e) => Some(e),
            SuitcutError::Internal(_) => None,
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

impl SuitcutError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SuitcutError::Order(_) => StatusCode::NOT_FOUND,
            SuitcutError::Agent(_) => StatusCode::NOT_FOUND,
            SuitcutError::Transition(_) => StatusCode::CONFLICT,
            SuitcutError::Validation(_) => StatusCode::BAD_REQUEST,
            SuitcutError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SuitcutError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SuitcutError::Request(e) => e.status_code(),
            SuitcutError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SuitcutError::Order(_) => "ORDER_NOT_FOUND",
            SuitcutError::Agent(_) => "AGENT_NOT_FOUND",
            SuitcutError::Transition(_) => "TRANSITION_NOT_ALLOWED",
            SuitcutError::Validation(e) => e.error_code(),
            SuitcutError::Config(_) => "CONFIG_ERROR",
            SuitcutError::Storage(_) => "STORAGE_ERROR",
            SuitcutError::Request(e) => e.error_code(),
            SuitcutError::Internal(_) => "INTERNAL_ERROR",
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

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            SuitcutError::Order(OrderError::NotFound { id }) => {
                Some(serde_json::json!({ "order_id": id.to_string() }))
            }
            SuitcutError::Transition(TransitionError::NotAllowed { order_id, from, to }) => {
                Some(serde_json::json!({
                    "order_id": order_id.to_string(),
                    "from": from,
                    "to": to,
                    "offered": from
                        .offered_transitions()
                        .iter()
                        .map(|t| t.to)
                        .collect::<Vec<_>>(),
                }))
            }
            SuitcutError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for SuitcutError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Order / Agent Errors
// =============================================================================

/// Errors related to order lookups
#[derive(Debug)]
pub enum OrderError {
    NotFound { id: Uuid },
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderError::NotFound { id } => write!(f, "order with id '{}' not found", id),
        }
    }
}

impl std::error::Error for OrderError {}

impl From<OrderError> for SuitcutError {
    fn from(err: OrderError) -> Self {
        SuitcutError::Order(err)
    }
}

/// Errors related to agents
#[derive(Debug)]
pub enum AgentError {
    /// No agent with this id in the fixed roster
    NotFound { id: Uuid },
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::NotFound { id } => write!(f, "agent with id '{}' not found", id),
        }
    }
}

impl std::error::Error for AgentError {}

impl From<AgentError> for SuitcutError {
    fn from(err: AgentError) -> Self {
        SuitcutError::Agent(err)
    }
}

// =============================================================================
// Transition Errors
// =============================================================================

/// Status changes rejected by the pipeline
#[derive(Debug)]
pub enum TransitionError {
    /// `to` is neither the successor of `from` nor an allowed regression
    NotAllowed {
        order_id: Uuid,
        from: OrderStatus,
        to: OrderStatus,
    },
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransitionError::NotAllowed { order_id, from, to } => write!(
                f,
                "order '{}' cannot move from '{}' to '{}'",
                order_id, from, to
            ),
        }
    }
}

impl std::error::Error for TransitionError {}

impl From<TransitionError> for SuitcutError {
    fn from(err: TransitionError) -> Self {
        SuitcutError::Transition(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to input validation
#[derive(Debug)]
pub enum ValidationError {
    /// Multiple field validation errors
    FieldErrors(Vec<FieldValidationError>),

    /// Invalid JSON format
    InvalidJson { message: String },

    /// Status label outside the pipeline
    UnknownStatus { value: String },
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
            ValidationError::InvalidJson { message } => {
                write!(f, "Invalid JSON: {}", message)
            }
            ValidationError::UnknownStatus { value } => {
                write!(f, "Unknown order status: '{}'", value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::UnknownStatus { .. } => "UNKNOWN_STATUS",
            ValidationError::InvalidJson { .. } => "INVALID_JSON",
            _ => "VALIDATION_ERROR",
        }
    }
}

impl From<ValidationError> for SuitcutError {
    fn from(err: ValidationError) -> Self {
        SuitcutError::Validation(err)
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
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

impl From<validator::ValidationErrors> for SuitcutError {
    fn from(errors: validator::ValidationErrors) -> Self {
        SuitcutError::Validation(errors.into())
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration and wiring
#[derive(Debug)]
pub enum ConfigError {
    /// A required component was not provided
    MissingField { field: String, context: String },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingField { field, context } => {
                write!(f, "Missing required field '{}' in {}", field, context)
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for SuitcutError {
    fn from(err: ConfigError) -> Self {
        SuitcutError::Config(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to the in-memory stores
#[derive(Debug)]
pub enum StorageError {
    /// A lock was poisoned by a panicking writer
    LockPoisoned { store: String },

    /// Store is not available
    Unavailable { store: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::LockPoisoned { store } => {
                write!(f, "Failed to acquire lock on {} store", store)
            }
            StorageError::Unavailable { store } => {
                write!(f, "Store '{}' is unavailable", store)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for SuitcutError {
    fn from(err: StorageError) -> Self {
        SuitcutError::Storage(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

/// Errors related to HTTP requests
#[derive(Debug)]
pub enum RequestError {
    /// Invalid entity ID format
    InvalidEntityId { id: String },

    /// Resource does not exist at this path
    NotFound { path: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidEntityId { id } => {
                write!(f, "Invalid entity ID format: '{}'", id)
            }
            RequestError::NotFound { path } => write!(f, "Nothing found at '{}'", path),
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RequestError::InvalidEntityId { .. } => StatusCode::BAD_REQUEST,
            RequestError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidEntityId { .. } => "INVALID_ENTITY_ID",
            RequestError::NotFound { .. } => "NOT_FOUND",
        }
    }
}

impl From<RequestError> for SuitcutError {
    fn from(err: RequestError) -> Self {
        SuitcutError::Request(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<tera::Error> for SuitcutError {
    fn from(err: tera::Error) -> Self {
        SuitcutError::Internal(format!("template rendering failed: {}", err))
    }
}

impl From<crate::intake::capture::CaptureError> for SuitcutError {
    fn from(err: crate::intake::capture::CaptureError) -> Self {
        SuitcutError::Internal(err.to_string())
    }
}

impl From<crate::intake::ocr::OcrError> for SuitcutError {
    fn from(err: crate::intake::ocr::OcrError) -> Self {
        SuitcutError::Internal(err.to_string())
    }
}

// =============================================================================
// Result type alias
// =============================================================================

/// A specialized Result type for suitcut operations
pub type SuitcutResult<T> = Result<T, SuitcutError>;
