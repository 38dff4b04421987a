//! Response types for the Flight Booking Engine API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ErrorKind};

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
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// A 400 response carrying `error`.
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

/// Returns the HTTP status for an error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Configuration => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_code(error: &EngineError) -> &'static str {
    match error {
        EngineError::PassengerNotFound { .. } => "PASSENGER_NOT_FOUND",
        EngineError::FlightNotFound { .. } => "FLIGHT_NOT_FOUND",
        EngineError::BookingNotFound { .. } => "BOOKING_NOT_FOUND",
        EngineError::SeatClassNotFound { .. } => "SEAT_CLASS_NOT_FOUND",
        EngineError::NoSeatsAvailable { .. } => "NO_SEATS_AVAILABLE",
        EngineError::AlreadyCancelled { .. } => "ALREADY_CANCELLED",
        EngineError::AlreadyReserved { .. } => "ALREADY_RESERVED",
        EngineError::TransactionConflict { .. } => "TRANSACTION_CONFLICT",
        EngineError::InvalidBookingId { .. } => "INVALID_BOOKING_ID",
        EngineError::ConfigNotFound { .. }
        | EngineError::ConfigParseError { .. }
        | EngineError::InvalidConfig { .. } => "CONFIG_ERROR",
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let status = status_for(error.kind());
        let code = error_code(&error);
        let error = match &error {
            EngineError::NoSeatsAvailable { .. } => ApiError::with_details(
                code,
                error.to_string(),
                "The class is sold out or not offered on this flight",
            ),
            // Internal details stay in the logs.
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => {
                ApiError::with_details(code, "Configuration error", error.to_string())
            }
            _ => ApiError::new(code, error.to_string()),
        };
        ApiErrorResponse { status, error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let response: ApiErrorResponse = EngineError::FlightNotFound {
            flight_id: "F404".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(response.error.code, "FLIGHT_NOT_FOUND");
        assert!(response.error.message.contains("F404"));
    }

    #[test]
    fn test_conflicts_map_to_409() {
        let response: ApiErrorResponse = EngineError::AlreadyCancelled {
            booking_id: "B00001".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert_eq!(response.error.code, "ALREADY_CANCELLED");

        let response: ApiErrorResponse = EngineError::NoSeatsAvailable {
            flight_id: "F001".to_string(),
            class_name: "First".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::CONFLICT);
        assert!(response.error.details.is_some());
    }

    #[test]
    fn test_invalid_booking_id_maps_to_400() {
        let response: ApiErrorResponse = EngineError::InvalidBookingId {
            value: "X1".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.error.code, "INVALID_BOOKING_ID");
    }

    #[test]
    fn test_config_errors_map_to_500() {
        let response: ApiErrorResponse = EngineError::InvalidConfig {
            message: "duplicate flight 'F001'".to_string(),
        }
        .into();
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.message, "Configuration error");
    }
}
