//! Core data models for the Flight Booking Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod booking;
mod booking_result;
mod flight;
mod passenger;
mod price_quote;
mod seat;

pub use booking::{Booking, BookingId, BookingStatus, NewBooking};
pub use booking_result::{
    BookingConfirmation, BookingDetails, BookingHistoryEntry, BookingRequest, CancellationReceipt,
};
pub use flight::{Flight, FlightKey, SeatClass, SeatLayout};
pub use passenger::{Passenger, PassengerKey};
pub use price_quote::{
    AdjustmentKind, AuditStep, PriceAdjustment, PriceQuote, RefundQuote, RefundTier,
};
pub use seat::{ClassAvailability, Seat, SeatId, SeatOccupancy};
