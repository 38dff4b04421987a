//! Booking ledger models.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

use super::{FlightKey, PassengerKey, SeatId};

/// Sequence identifier of a booking, rendered as `B00001`.
///
/// # Example
///
/// ```
/// use flight_booking_engine::models::BookingId;
///
/// let id: BookingId = "B00042".parse().unwrap();
/// assert_eq!(id, BookingId(42));
/// assert_eq!(id.to_string(), "B00042");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BookingId(pub u64);

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "B{:05}", self.0)
    }
}

impl FromStr for BookingId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidBookingId {
            value: s.to_string(),
        };
        let digits = s.strip_prefix('B').ok_or_else(invalid)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        digits.parse::<u64>().map(BookingId).map_err(|_| invalid())
    }
}

impl Serialize for BookingId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BookingId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Lifecycle status of a booking. `Cancelled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingStatus {
    /// The booking holds its seat.
    Confirmed,
    /// The booking was cancelled and released its seat.
    Cancelled,
}

impl BookingStatus {
    /// Returns true for the terminal state.
    pub fn is_cancelled(self) -> bool {
        self == BookingStatus::Cancelled
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Confirmed => f.write_str("Confirmed"),
            BookingStatus::Cancelled => f.write_str("Cancelled"),
        }
    }
}

/// A booking row as held by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    /// Sequence identifier.
    pub id: BookingId,
    /// Passenger holding the booking.
    pub passenger: PassengerKey,
    /// Booked flight.
    pub flight: FlightKey,
    /// Seat held while confirmed.
    pub seat: SeatId,
    /// Date the booking was made.
    pub booking_date: NaiveDate,
    /// Flight departure, copied at booking time for refund computation.
    pub departure: NaiveDateTime,
    /// Final price paid.
    pub price: Decimal,
    /// Current status.
    pub status: BookingStatus,
}

/// Values for a ledger insert; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    /// Passenger holding the booking.
    pub passenger: PassengerKey,
    /// Booked flight.
    pub flight: FlightKey,
    /// Reserved seat.
    pub seat: SeatId,
    /// Date the booking was made.
    pub booking_date: NaiveDate,
    /// Flight departure.
    pub departure: NaiveDateTime,
    /// Final price.
    pub price: Decimal,
}
