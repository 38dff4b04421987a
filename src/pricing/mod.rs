//! Pricing and refund logic for the Flight Booking Engine.
//!
//! This module contains the pure calculation functions: the time-based
//! early booking discount and last-minute surcharge, the occupancy
//! surcharge, the frequent flyer discount, the pipeline that combines them
//! into a final price, and the time-tiered cancellation refund policy.

mod loyalty;
mod occupancy;
mod pipeline;
mod refund;
mod time_based;

pub use loyalty::{
    LOYALTY_WINDOW_DAYS, LoyaltyDiscountResult, calculate_loyalty_discount, loyalty_rate,
    loyalty_window_start,
};
pub use occupancy::{
    OccupancySurchargeResult, calculate_occupancy_surcharge, occupancy_surcharge_rate,
};
pub use pipeline::{PricingContext, apply_adjustments, price_floor, quote_price};
pub use refund::{
    EARLY_REFUND_MIN_DAYS, STANDARD_REFUND_MIN_DAYS, calculate_refund, days_until_departure,
    refund_tier,
};
pub use time_based::{
    EARLY_BOOKING_MIN_DAYS, LAST_MINUTE_MAX_DAYS, TimeAdjustmentResult, calculate_time_adjustment,
    days_before_departure, time_based_rate,
};
