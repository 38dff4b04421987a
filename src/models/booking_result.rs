//! Inputs and outputs of the booking engine operations.
//!
//! These are plain structured records; the HTTP layer serializes them as-is.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditStep, BookingId, BookingStatus, PriceAdjustment, RefundTier};

/// A request to book one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    /// External passenger identifier.
    pub passenger_id: String,
    /// External flight identifier.
    pub flight_id: String,
    /// Requested seat class name.
    pub seat_class: String,
    /// The date the booking is made.
    pub booking_date: NaiveDate,
}

/// Returned by a successful booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    /// Generated booking identifier.
    pub booking_id: BookingId,
    /// External passenger identifier.
    pub passenger_id: String,
    /// External flight identifier.
    pub flight_id: String,
    /// The reserved seat number.
    pub seat: String,
    /// The seat class booked.
    pub seat_class: String,
    /// Final price charged.
    pub price: Decimal,
    /// Always `Confirmed`.
    pub status: BookingStatus,
    /// Adjustments applied to the base price.
    pub adjustments: Vec<PriceAdjustment>,
    /// Pricing rule decisions.
    pub audit_trace: Vec<AuditStep>,
}

/// Returned by a successful cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationReceipt {
    /// The cancelled booking.
    pub booking_id: BookingId,
    /// Always `Cancelled`.
    pub status: BookingStatus,
    /// Amount refunded.
    pub refund_amount: Decimal,
    /// Refund band applied.
    pub refund_tier: RefundTier,
    /// Inclusive day count used to pick the band.
    pub days_until_departure: i64,
}

/// A booking joined with its passenger, seat and flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDetails {
    /// Booking identifier.
    pub booking_id: BookingId,
    /// External passenger identifier.
    pub passenger_id: String,
    /// External flight identifier.
    pub flight_id: String,
    /// Seat number.
    pub seat_number: String,
    /// Seat class.
    pub class_name: String,
    /// Date the booking was made.
    pub booking_date: NaiveDate,
    /// Price paid.
    pub price: Decimal,
    /// Current status.
    pub status: BookingStatus,
    /// Flight departure.
    pub departure: NaiveDateTime,
    /// Flight arrival.
    pub arrival: NaiveDateTime,
    /// Flight origin.
    pub origin: String,
    /// Flight destination.
    pub destination: String,
}

/// One row of a passenger's booking history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingHistoryEntry {
    /// Booking identifier.
    pub booking_id: BookingId,
    /// External flight identifier.
    pub flight_id: String,
    /// Date the booking was made.
    pub booking_date: NaiveDate,
    /// Current status.
    pub status: BookingStatus,
    /// Price paid.
    pub price: Decimal,
    /// Seat number.
    pub seat_number: String,
    /// Seat class.
    pub class_name: String,
    /// Flight departure.
    pub departure: NaiveDateTime,
    /// Flight arrival.
    pub arrival: NaiveDateTime,
    /// Flight origin.
    pub origin: String,
    /// Flight destination.
    pub destination: String,
}
