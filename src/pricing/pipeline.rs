//! The fixed pricing pipeline.
//!
//! Every rule is evaluated against the same base price and the resulting
//! amounts are summed. Rules never see each other's output, so the final
//! price does not depend on evaluation order.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::models::{AdjustmentKind, AuditStep, PriceAdjustment, PriceQuote, SeatOccupancy};

use super::{calculate_loyalty_discount, calculate_occupancy_surcharge, calculate_time_adjustment};

/// Everything the pipeline needs, read by the caller beforehand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingContext {
    /// Base fare of the requested class.
    pub base_price: Decimal,
    /// The date the booking is made.
    pub booking_date: NaiveDate,
    /// Flight departure.
    pub departure: NaiveDateTime,
    /// Occupancy of the requested class before this booking.
    pub occupancy: SeatOccupancy,
    /// Passenger's confirmed bookings inside the loyalty window.
    pub prior_bookings: u32,
}

/// Returns the lowest price the pipeline may produce: half the base price.
pub fn price_floor(base_price: Decimal) -> Decimal {
    base_price * Decimal::new(5, 1)
}

/// Sums adjustments onto the base price and applies the half-price floor.
///
/// Returns the final price and whether the floor was applied.
pub fn apply_adjustments(base_price: Decimal, adjustments: &[PriceAdjustment]) -> (Decimal, bool) {
    let adjusted = base_price + adjustments.iter().map(|a| a.amount).sum::<Decimal>();
    let floor = price_floor(base_price);
    if adjusted < floor {
        (floor, true)
    } else {
        (adjusted, false)
    }
}

/// Runs the time, occupancy and loyalty rules and builds a [`PriceQuote`].
///
/// # Examples
///
/// ```
/// use flight_booking_engine::pricing::{quote_price, PricingContext};
/// use flight_booking_engine::models::SeatOccupancy;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let context = PricingContext {
///     base_price: Decimal::new(300, 0),
///     booking_date: NaiveDate::from_ymd_opt(2025, 1, 30).unwrap(),
///     departure: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
///     occupancy: SeatOccupancy { booked: 0, total: 36 },
///     prior_bookings: 0,
/// };
///
/// let quote = quote_price(&context);
/// assert_eq!(quote.final_price, Decimal::new(270, 0));
/// assert_eq!(quote.adjustments.len(), 1);
/// ```
pub fn quote_price(context: &PricingContext) -> PriceQuote {
    let base_price = context.base_price;
    let mut adjustments = Vec::new();
    let mut audit_trace = Vec::new();

    let time = calculate_time_adjustment(context.booking_date, context.departure, 1);
    if let Some(kind) = time.kind {
        adjustments.push(adjustment(kind, time.rate, base_price));
    }
    audit_trace.push(time.audit_step);

    let occupancy = calculate_occupancy_surcharge(context.occupancy, 2);
    if occupancy.rate > Decimal::ZERO {
        adjustments.push(adjustment(
            AdjustmentKind::HighOccupancy,
            occupancy.rate,
            base_price,
        ));
    }
    audit_trace.push(occupancy.audit_step);

    let loyalty = calculate_loyalty_discount(context.prior_bookings, 3);
    if loyalty.rate != Decimal::ZERO {
        adjustments.push(adjustment(
            AdjustmentKind::FrequentFlyer,
            loyalty.rate,
            base_price,
        ));
    }
    audit_trace.push(loyalty.audit_step);

    let (final_price, floor_applied) = apply_adjustments(base_price, &adjustments);
    let total: Decimal = adjustments.iter().map(|a| a.amount).sum();

    audit_trace.push(AuditStep {
        step_number: 4,
        rule_id: "final_price".to_string(),
        rule_name: "Final Price".to_string(),
        input: serde_json::json!({
            "base_price": base_price.normalize().to_string(),
            "total_adjustment": total.normalize().to_string(),
        }),
        output: serde_json::json!({
            "final_price": final_price.normalize().to_string(),
            "floor_applied": floor_applied,
        }),
        reasoning: if floor_applied {
            format!(
                "${} + ${} is below half the base price - floored at ${}",
                base_price.normalize(),
                total.normalize(),
                final_price.normalize()
            )
        } else {
            format!(
                "${} + ${} = ${}",
                base_price.normalize(),
                total.normalize(),
                final_price.normalize()
            )
        },
    });

    PriceQuote {
        base_price,
        final_price,
        adjustments,
        floor_applied,
        audit_trace,
    }
}

fn adjustment(kind: AdjustmentKind, rate: Decimal, base_price: Decimal) -> PriceAdjustment {
    PriceAdjustment {
        kind,
        rate,
        amount: rate * base_price,
    }
}
