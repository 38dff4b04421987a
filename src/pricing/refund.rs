//! Cancellation refund policy.
//!
//! Days until departure are counted inclusively: the time delta is rounded
//! up to whole days and one more day is added, so a departure later today
//! is day 1, not day 0.

use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;

use crate::models::{RefundQuote, RefundTier};

/// Minimum inclusive day count for the early refund tier.
pub const EARLY_REFUND_MIN_DAYS: i64 = 30;

/// Minimum inclusive day count for the standard refund tier.
pub const STANDARD_REFUND_MIN_DAYS: i64 = 7;

/// Returns `ceil((departure - as_of) / 1 day) + 1`.
///
/// ```
/// use flight_booking_engine::pricing::days_until_departure;
/// use chrono::NaiveDate;
///
/// let as_of = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let departure = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
/// // 28 days and 10 hours rounds up to 29, plus the inclusive day
/// assert_eq!(days_until_departure(as_of, departure), 30);
/// ```
pub fn days_until_departure(as_of: NaiveDateTime, departure: NaiveDateTime) -> i64 {
    let delta = departure - as_of;
    // num_days truncates toward zero, so only a positive remainder rounds up
    let whole_days = delta.num_days();
    let rounded_up = if delta - Duration::days(whole_days) > Duration::zero() {
        whole_days + 1
    } else {
        whole_days
    };
    rounded_up + 1
}

/// Selects the refund band for an inclusive day count.
pub fn refund_tier(days_until_departure: i64) -> RefundTier {
    if days_until_departure >= EARLY_REFUND_MIN_DAYS {
        RefundTier::Early
    } else if days_until_departure >= STANDARD_REFUND_MIN_DAYS {
        RefundTier::Standard
    } else {
        RefundTier::Late
    }
}

/// Computes the refund for a cancelled booking.
///
/// # Arguments
///
/// * `paid_price` - The final price stored on the booking
/// * `departure` - The flight departure
/// * `as_of` - The policy reference time, normally the current time
///
/// # Examples
///
/// ```
/// use flight_booking_engine::pricing::calculate_refund;
/// use flight_booking_engine::models::RefundTier;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let as_of = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let departure = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
///
/// let refund = calculate_refund(Decimal::new(300, 0), departure, as_of);
/// assert_eq!(refund.tier, RefundTier::Early);
/// assert_eq!(refund.refund_amount, Decimal::new(270, 0));
/// ```
pub fn calculate_refund(
    paid_price: Decimal,
    departure: NaiveDateTime,
    as_of: NaiveDateTime,
) -> RefundQuote {
    let days = days_until_departure(as_of, departure);
    let tier = refund_tier(days);

    RefundQuote {
        days_until_departure: days,
        tier,
        refund_amount: paid_price * tier.refund_rate(),
    }
}
