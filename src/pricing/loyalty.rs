//! Frequent flyer discount.
//!
//! Counts the passenger's confirmed bookings made within the trailing
//! 365 days of the current booking date (inclusive on both ends).

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::models::AuditStep;

/// Length of the loyalty window in days.
pub const LOYALTY_WINDOW_DAYS: i64 = 365;

/// The result of the loyalty rule, including the rate and audit step.
#[derive(Debug, Clone)]
pub struct LoyaltyDiscountResult {
    /// Signed rate: -0.15, -0.10 or zero.
    pub rate: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the first date that still counts toward loyalty.
///
/// ```
/// use flight_booking_engine::pricing::loyalty_window_start;
/// use chrono::NaiveDate;
///
/// let booked = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
/// assert_eq!(loyalty_window_start(booked), NaiveDate::from_ymd_opt(2024, 2, 2).unwrap());
/// ```
pub fn loyalty_window_start(booking_date: NaiveDate) -> NaiveDate {
    booking_date - Duration::days(LOYALTY_WINDOW_DAYS)
}

/// Returns the discount rate for a count of prior confirmed bookings.
pub fn loyalty_rate(prior_bookings: u32) -> Decimal {
    match prior_bookings {
        10.. => Decimal::new(-15, 2),
        5..=9 => Decimal::new(-10, 2),
        _ => Decimal::ZERO,
    }
}

/// Evaluates the loyalty rule.
pub fn calculate_loyalty_discount(prior_bookings: u32, step_number: u32) -> LoyaltyDiscountResult {
    let rate = loyalty_rate(prior_bookings);

    let reasoning = if rate < Decimal::ZERO {
        format!(
            "{} confirmed bookings in the last {} days - frequent flyer discount of {}%",
            prior_bookings,
            LOYALTY_WINDOW_DAYS,
            (rate.abs() * Decimal::ONE_HUNDRED).normalize()
        )
    } else {
        format!(
            "{} confirmed bookings in the last {} days - no frequent flyer discount",
            prior_bookings, LOYALTY_WINDOW_DAYS
        )
    };

    LoyaltyDiscountResult {
        rate,
        audit_step: AuditStep {
            step_number,
            rule_id: "frequent_flyer_discount".to_string(),
            rule_name: "Frequent Flyer Discount".to_string(),
            input: serde_json::json!({ "prior_bookings": prior_bookings }),
            output: serde_json::json!({
                "rate": rate.normalize().to_string(),
                "applied": rate != Decimal::ZERO,
            }),
            reasoning,
        },
    }
}
