//! Error types for the Flight Booking Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while reserving seats, pricing
//! bookings and processing cancellations.

use thiserror::Error;

/// Broad classification of an [`EngineError`].
///
/// Callers (such as the HTTP layer) use the kind to decide how to report a
/// failure without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A referenced passenger, flight, seat class or booking does not exist.
    NotFound,
    /// The request lost a race or violates a state transition.
    Conflict,
    /// An identifier or input value was malformed.
    Validation,
    /// Configuration could not be loaded.
    Configuration,
}

/// The main error type for the Flight Booking Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use flight_booking_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::FlightNotFound {
///     flight_id: "F999".to_string(),
/// };
/// assert_eq!(error.to_string(), "Flight not found: F999");
/// assert_eq!(error.kind(), ErrorKind::NotFound);
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No passenger exists with the given external identifier.
    #[error("Passenger not found: {passenger_id}")]
    PassengerNotFound {
        /// The external passenger identifier.
        passenger_id: String,
    },

    /// No flight exists with the given external identifier.
    #[error("Flight not found: {flight_id}")]
    FlightNotFound {
        /// The external flight identifier.
        flight_id: String,
    },

    /// No booking exists with the given identifier.
    #[error("Booking not found: {booking_id}")]
    BookingNotFound {
        /// The booking identifier.
        booking_id: String,
    },

    /// The seat class is not part of the fare catalogue.
    #[error("Seat class not found: {class_name}")]
    SeatClassNotFound {
        /// The requested class name.
        class_name: String,
    },

    /// Every seat of the requested class on the flight is taken.
    #[error("No seats available in class '{class_name}' on flight {flight_id}")]
    NoSeatsAvailable {
        /// The external flight identifier.
        flight_id: String,
        /// The requested class name.
        class_name: String,
    },

    /// The booking has already been cancelled.
    #[error("Booking {booking_id} is already cancelled")]
    AlreadyCancelled {
        /// The booking identifier.
        booking_id: String,
    },

    /// The seat was already marked unavailable.
    #[error("Seat {seat} is already reserved")]
    AlreadyReserved {
        /// The seat identifier.
        seat: String,
    },

    /// The underlying store could not complete the transaction.
    #[error("Transaction conflict: {message}")]
    TransactionConflict {
        /// A description of the conflict.
        message: String,
    },

    /// A booking identifier could not be parsed.
    #[error("Invalid booking id '{value}': expected a code like B00001")]
    InvalidBookingId {
        /// The raw value that was supplied.
        value: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but is inconsistent.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the inconsistency.
        message: String,
    },
}

impl EngineError {
    /// Returns the broad category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::PassengerNotFound { .. }
            | EngineError::FlightNotFound { .. }
            | EngineError::BookingNotFound { .. }
            | EngineError::SeatClassNotFound { .. } => ErrorKind::NotFound,
            EngineError::NoSeatsAvailable { .. }
            | EngineError::AlreadyCancelled { .. }
            | EngineError::AlreadyReserved { .. }
            | EngineError::TransactionConflict { .. } => ErrorKind::Conflict,
            EngineError::InvalidBookingId { .. } => ErrorKind::Validation,
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. } => ErrorKind::Configuration,
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
