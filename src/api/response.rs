//! Response types for the Coverage Engine API.
//!
//! This module defines the success bodies returned by the roster endpoints
//! and the error response structures used by every endpoint.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::CalculatorSettings;
use crate::error::EngineError;
use crate::models::{ClinicianEntry, StaffingModel};

/// Body returned when a session is created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionCreated {
    /// Identifier to use in subsequent session requests.
    pub session_id: Uuid,
}

/// Body returned when an entry is added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryAdded {
    /// The entry appended to the roster.
    pub entry: ClinicianEntry,
    /// Whether the entry is buffered as APP-class.
    pub is_app: bool,
    /// Explanation of the shift arithmetic.
    pub reasoning: String,
    /// Confirmation message for display.
    pub message: String,
    /// Number of entries after the add.
    pub roster_size: usize,
}

/// Body returned by remove-last and clear.
///
/// Removing from an empty roster is not an error: `removed` is `None` and
/// `message` says there was nothing to remove.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterChanged {
    /// The entry removed, if any.
    pub removed: Option<ClinicianEntry>,
    /// Message for display.
    pub message: String,
    /// Number of entries after the change.
    pub roster_size: usize,
}

/// Body returned by the models endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsResponse {
    /// Active calculator settings.
    pub settings: CalculatorSettings,
    /// Staffing models in comparison order.
    pub models: Vec<StaffingModel>,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid session id error response.
    pub fn invalid_session_id(message: impl Into<String>) -> Self {
        Self::new("INVALID_SESSION_ID", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a 400 response for the given error body.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidSettings { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
            },
            EngineError::InvalidModel { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "INVALID_MODEL",
                    message,
                    "The staffing model configuration is malformed",
                ),
            },
            EngineError::InvalidParameter { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_PARAMETER",
                    message,
                    "The clinician parameters were rejected; the roster is unchanged",
                ),
            },
            EngineError::EmptyRoster => ApiErrorResponse {
                status: StatusCode::OK,
                error: ApiError::new("EMPTY_ROSTER", message),
            },
            EngineError::SessionNotFound { .. } => ApiErrorResponse {
                status: StatusCode::NOT_FOUND,
                error: ApiError::new("SESSION_NOT_FOUND", message),
            },
            EngineError::UnsupportedSnapshotVersion { .. } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::new("UNSUPPORTED_SNAPSHOT_VERSION", message),
            },
            EngineError::CalculationError { .. } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CALCULATION_ERROR", "Calculation failed", message),
            },
        }
    }
}
