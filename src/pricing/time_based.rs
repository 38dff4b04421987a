//! Time-based adjustment: early booking discount and last-minute surcharge.
//!
//! The day count for this rule is floored, so a departure 29 days and
//! 23 hours after the booking date counts as 29 days.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::models::{AdjustmentKind, AuditStep};

/// Minimum days before departure for the early booking discount.
pub const EARLY_BOOKING_MIN_DAYS: i64 = 30;

/// Maximum days before departure for the last-minute surcharge.
pub const LAST_MINUTE_MAX_DAYS: i64 = 7;

/// The result of the time-based rule, including the rate and audit step.
#[derive(Debug, Clone)]
pub struct TimeAdjustmentResult {
    /// Whole days between booking date (midnight) and departure, floored.
    pub days_before_departure: i64,
    /// Signed rate: -0.10, +0.20 or zero.
    pub rate: Decimal,
    /// The adjustment kind when the rate is nonzero.
    pub kind: Option<AdjustmentKind>,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns `floor((departure - booking_date@00:00) / 1 day)`.
///
/// Negative when the departure lies before the booking date.
///
/// ```
/// use flight_booking_engine::pricing::days_before_departure;
/// use chrono::NaiveDate;
///
/// let booked = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
/// let departure = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
/// assert_eq!(days_before_departure(booked, departure), 28);
/// ```
pub fn days_before_departure(booking_date: NaiveDate, departure: NaiveDateTime) -> i64 {
    let delta = departure - booking_date.and_time(NaiveTime::MIN);
    // num_days truncates toward zero, so only a negative remainder rounds down
    let whole_days = delta.num_days();
    if delta - Duration::days(whole_days) < Duration::zero() {
        whole_days - 1
    } else {
        whole_days
    }
}

/// Returns the time-based rate for a floored day count.
///
/// The 8..=29 day band carries no adjustment.
pub fn time_based_rate(days_before_departure: i64) -> Decimal {
    if days_before_departure >= EARLY_BOOKING_MIN_DAYS {
        Decimal::new(-10, 2)
    } else if days_before_departure <= LAST_MINUTE_MAX_DAYS {
        Decimal::new(20, 2)
    } else {
        Decimal::ZERO
    }
}

/// Evaluates the time-based rule.
///
/// # Arguments
///
/// * `booking_date` - The date the booking is made
/// * `departure` - The scheduled departure of the flight
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use flight_booking_engine::pricing::calculate_time_adjustment;
/// use flight_booking_engine::models::AdjustmentKind;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let booked = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
/// let departure = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
///
/// let result = calculate_time_adjustment(booked, departure, 1);
/// assert_eq!(result.rate, Decimal::new(-10, 2));
/// assert_eq!(result.kind, Some(AdjustmentKind::EarlyBooking));
/// ```
pub fn calculate_time_adjustment(
    booking_date: NaiveDate,
    departure: NaiveDateTime,
    step_number: u32,
) -> TimeAdjustmentResult {
    let days = days_before_departure(booking_date, departure);
    let rate = time_based_rate(days);

    let kind = if rate < Decimal::ZERO {
        Some(AdjustmentKind::EarlyBooking)
    } else if rate > Decimal::ZERO {
        Some(AdjustmentKind::LastMinute)
    } else {
        None
    };

    let reasoning = match kind {
        Some(AdjustmentKind::EarlyBooking) => format!(
            "{} days before departure >= {} - early booking discount of {}%",
            days,
            EARLY_BOOKING_MIN_DAYS,
            (rate.abs() * Decimal::ONE_HUNDRED).normalize()
        ),
        Some(_) => format!(
            "{} days before departure <= {} - last minute surcharge of {}%",
            days,
            LAST_MINUTE_MAX_DAYS,
            (rate * Decimal::ONE_HUNDRED).normalize()
        ),
        None => format!(
            "{} days before departure - no time-based adjustment",
            days
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "time_based_adjustment".to_string(),
        rule_name: "Time-Based Adjustment".to_string(),
        input: serde_json::json!({
            "booking_date": booking_date.to_string(),
            "departure": departure.to_string(),
        }),
        output: serde_json::json!({
            "days_before_departure": days,
            "rate": rate.normalize().to_string(),
            "applied": kind.is_some(),
        }),
        reasoning,
    };

    TimeAdjustmentResult {
        days_before_departure: days,
        rate,
        kind,
        audit_step,
    }
}
