//! Occupancy surcharge based on how full the requested cabin already is.

use rust_decimal::Decimal;

use crate::models::{AuditStep, SeatOccupancy};

/// The result of the occupancy rule, including the rate and audit step.
#[derive(Debug, Clone)]
pub struct OccupancySurchargeResult {
    /// Booked seats divided by total seats.
    pub occupancy_rate: Decimal,
    /// Surcharge rate: 0.20, 0.10 or zero. Never negative.
    pub rate: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the surcharge rate for an occupancy rate.
pub fn occupancy_surcharge_rate(occupancy_rate: Decimal) -> Decimal {
    if occupancy_rate >= Decimal::new(8, 1) {
        Decimal::new(20, 2)
    } else if occupancy_rate >= Decimal::new(6, 1) {
        Decimal::new(10, 2)
    } else {
        Decimal::ZERO
    }
}

/// Evaluates the occupancy rule against a snapshot taken before the new
/// seat is claimed.
///
/// # Examples
///
/// ```
/// use flight_booking_engine::pricing::calculate_occupancy_surcharge;
/// use flight_booking_engine::models::SeatOccupancy;
/// use rust_decimal::Decimal;
///
/// let result = calculate_occupancy_surcharge(SeatOccupancy { booked: 22, total: 36 }, 2);
/// assert_eq!(result.rate, Decimal::new(10, 2));
/// ```
pub fn calculate_occupancy_surcharge(
    occupancy: SeatOccupancy,
    step_number: u32,
) -> OccupancySurchargeResult {
    let occupancy_rate = occupancy.rate();
    let rate = occupancy_surcharge_rate(occupancy_rate);
    let percent = (occupancy_rate * Decimal::ONE_HUNDRED).round_dp(1).normalize();

    let reasoning = if rate > Decimal::ZERO {
        format!(
            "{}/{} seats booked ({}%) - occupancy surcharge of {}%",
            occupancy.booked,
            occupancy.total,
            percent,
            (rate * Decimal::ONE_HUNDRED).normalize()
        )
    } else {
        format!(
            "{}/{} seats booked ({}%) - below occupancy surcharge threshold",
            occupancy.booked, occupancy.total, percent
        )
    };

    OccupancySurchargeResult {
        occupancy_rate,
        rate,
        audit_step: AuditStep {
            step_number,
            rule_id: "occupancy_surcharge".to_string(),
            rule_name: "High Occupancy Surcharge".to_string(),
            input: serde_json::json!({
                "booked_seats": occupancy.booked,
                "total_seats": occupancy.total,
            }),
            output: serde_json::json!({
                "occupancy_rate": occupancy_rate.round_dp(4).normalize().to_string(),
                "rate": rate.normalize().to_string(),
                "applied": rate > Decimal::ZERO,
            }),
            reasoning,
        },
    }
}
