//! Flight and seat class models.
//!
//! A [`Flight`] is immutable once provisioned. A [`SeatClass`] is a fare
//! category carrying the static base price and the seat layout that is
//! provisioned on every flight.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Internal key of a flight row in the store.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct FlightKey(pub u64);

/// A scheduled flight.
///
/// # Example
///
/// ```
/// use flight_booking_engine::models::{Flight, FlightKey};
/// use chrono::NaiveDate;
///
/// let departure = NaiveDate::from_ymd_opt(2025, 3, 1)
///     .unwrap()
///     .and_hms_opt(10, 0, 0)
///     .unwrap();
/// let flight = Flight {
///     key: FlightKey(1),
///     flight_id: "F001".to_string(),
///     airline: "Airline A".to_string(),
///     departure,
///     arrival: departure + chrono::Duration::hours(4),
///     origin: "City A".to_string(),
///     destination: "City B".to_string(),
/// };
/// assert_eq!(flight.duration_minutes(), 240);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flight {
    /// Internal store key.
    #[serde(skip)]
    pub key: FlightKey,
    /// External flight code (e.g., "F001"), unique.
    pub flight_id: String,
    /// Operating airline.
    pub airline: String,
    /// Scheduled departure (UTC).
    pub departure: NaiveDateTime,
    /// Scheduled arrival (UTC).
    pub arrival: NaiveDateTime,
    /// Origin city or airport.
    pub origin: String,
    /// Destination city or airport.
    pub destination: String,
}

impl Flight {
    /// Returns the scheduled block time in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.arrival - self.departure).num_minutes()
    }
}

/// How the seats of one class are laid out on every flight.
///
/// Seat numbers are `<row><letter>`, rows counting up from `first_row`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatLayout {
    /// The first row number of this cabin.
    pub first_row: u32,
    /// Number of rows in the cabin.
    pub rows: u32,
    /// Seat letters in each row (e.g., "ABCDEF").
    pub letters: String,
}

impl SeatLayout {
    /// Total seat count produced by this layout.
    pub fn total_seats(&self) -> u32 {
        self.rows * self.letters.chars().count() as u32
    }

    /// Generates the seat numbers in row order.
    ///
    /// ```
    /// use flight_booking_engine::models::SeatLayout;
    ///
    /// let layout = SeatLayout { first_row: 3, rows: 2, letters: "AB".to_string() };
    /// assert_eq!(layout.seat_numbers(), vec!["3A", "3B", "4A", "4B"]);
    /// ```
    pub fn seat_numbers(&self) -> Vec<String> {
        (self.first_row..self.first_row + self.rows)
            .flat_map(|row| self.letters.chars().map(move |letter| format!("{row}{letter}")))
            .collect()
    }
}

/// A fare category with a static base price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatClass {
    /// Class name (e.g., "Economy").
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Base fare before any adjustment.
    pub base_price: Decimal,
    /// Seat layout provisioned on every flight.
    pub layout: SeatLayout,
}

impl SeatClass {
    /// Fixed seat count of this class on a flight.
    pub fn total_seats(&self) -> u32 {
        self.layout.total_seats()
    }
}
