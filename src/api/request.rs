//! Request types for the Flight Booking Engine API.
//!
//! This module defines the JSON request structure for the `POST /bookings`
//! endpoint and its conversion into the engine's [`BookingRequest`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::BookingRequest;

use super::response::ApiError;

/// Request body for the `POST /bookings` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// External passenger id (e.g. "P001").
    pub passenger_id: String,
    /// External flight id (e.g. "F001").
    pub flight_id: String,
    /// Seat class name (e.g. "Economy").
    pub seat_class: String,
    /// The date the booking is made. Defaults to the server's current date.
    #[serde(default)]
    pub booking_date: Option<NaiveDate>,
}

impl CreateBookingRequest {
    /// Checks that every identifier is present.
    pub fn validate(&self) -> Result<(), ApiError> {
        for (field, value) in [
            ("passenger_id", &self.passenger_id),
            ("flight_id", &self.flight_id),
            ("seat_class", &self.seat_class),
        ] {
            if value.trim().is_empty() {
                return Err(ApiError::validation_error(format!(
                    "{} must not be empty",
                    field
                )));
            }
        }
        Ok(())
    }

    /// Converts into an engine request, filling a missing booking date with `today`.
    pub fn into_booking_request(self, today: NaiveDate) -> BookingRequest {
        BookingRequest {
            passenger_id: self.passenger_id,
            flight_id: self.flight_id,
            seat_class: self.seat_class,
            booking_date: self.booking_date.unwrap_or(today),
        }
    }
}
