//! Flight Booking Engine
//!
//! This crate manages flight seat inventory and computes dynamic, rule-based
//! prices for bookings: time-based discounts and surcharges, an occupancy
//! surcharge and a frequent flyer discount, plus a time-tiered refund policy
//! for cancellations. Seat reservation is atomic under concurrent bookings.

#![warn(missing_docs)]

pub mod api;
pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod pricing;
pub mod store;
