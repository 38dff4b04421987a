//! Seat inventory models.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::FlightKey;

/// Internal identifier of a seat row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SeatId(pub u64);

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// A single seat on a flight.
///
/// The availability flag is owned by the store and only flipped by the
/// booking engine inside a booking or cancellation transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    /// Internal seat identifier.
    pub id: SeatId,
    /// The flight this seat belongs to.
    pub flight: FlightKey,
    /// The seat class this seat belongs to.
    pub class_name: String,
    /// Human-readable seat number (e.g., "12B").
    pub seat_number: String,
    /// True while no confirmed booking holds the seat.
    pub is_available: bool,
}

/// Booked vs total seats for one class on one flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatOccupancy {
    /// Seats currently held by confirmed bookings.
    pub booked: u32,
    /// Fixed seat count for the class.
    pub total: u32,
}

impl SeatOccupancy {
    /// Returns `booked / total`, or zero for an empty cabin.
    ///
    /// ```
    /// use flight_booking_engine::models::SeatOccupancy;
    /// use rust_decimal::Decimal;
    ///
    /// let occupancy = SeatOccupancy { booked: 27, total: 36 };
    /// assert_eq!(occupancy.rate(), Decimal::new(75, 2));
    /// ```
    pub fn rate(&self) -> Decimal {
        if self.total == 0 {
            return Decimal::ZERO;
        }
        Decimal::from(self.booked) / Decimal::from(self.total)
    }

    /// Seats still open for booking.
    pub fn available(&self) -> u32 {
        self.total.saturating_sub(self.booked)
    }
}

/// Per-class seat summary for a flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassAvailability {
    /// The seat class name.
    pub class_name: String,
    /// Fixed seat count.
    pub total: u32,
    /// Seats not held by a confirmed booking.
    pub available: u32,
}
