//! Pricing and refund result models.
//!
//! This module contains the [`PriceQuote`] produced by the pricing pipeline,
//! its itemized [`PriceAdjustment`]s and audit trail, and the
//! [`RefundQuote`] produced by the cancellation policy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The category of a price adjustment.
///
/// Serialized using the customer-facing label.
///
/// # Example
///
/// ```
/// use flight_booking_engine::models::AdjustmentKind;
///
/// assert_eq!(AdjustmentKind::EarlyBooking.label(), "Early Booking Discount");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdjustmentKind {
    /// Booked 30 or more days before departure.
    #[serde(rename = "Early Booking Discount")]
    EarlyBooking,
    /// Booked 7 or fewer days before departure.
    #[serde(rename = "Last Minute Surcharge")]
    LastMinute,
    /// The cabin is at least 60% full.
    #[serde(rename = "High Occupancy Surcharge")]
    HighOccupancy,
    /// The passenger booked at least 5 times in the past year.
    #[serde(rename = "Frequent Flyer Discount")]
    FrequentFlyer,
}

impl AdjustmentKind {
    /// Returns the customer-facing label.
    pub fn label(self) -> &'static str {
        match self {
            AdjustmentKind::EarlyBooking => "Early Booking Discount",
            AdjustmentKind::LastMinute => "Last Minute Surcharge",
            AdjustmentKind::HighOccupancy => "High Occupancy Surcharge",
            AdjustmentKind::FrequentFlyer => "Frequent Flyer Discount",
        }
    }
}

/// A single line item applied to a base fare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceAdjustment {
    /// What kind of adjustment this is.
    #[serde(rename = "type")]
    pub kind: AdjustmentKind,
    /// Signed rate relative to the base price (e.g., -0.10).
    pub rate: Decimal,
    /// Signed amount, `rate * base_price`.
    pub amount: Decimal,
}

/// A single step in the audit trace recording a pricing decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete result of running the pricing pipeline.
///
/// # Example
///
/// ```
/// use flight_booking_engine::models::PriceQuote;
/// use rust_decimal::Decimal;
///
/// let quote = PriceQuote {
///     base_price: Decimal::new(300, 0),
///     final_price: Decimal::new(300, 0),
///     adjustments: vec![],
///     floor_applied: false,
///     audit_trace: vec![],
/// };
/// assert_eq!(quote.total_adjustment(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// The class base price the adjustments were computed from.
    pub base_price: Decimal,
    /// The price charged, never below half of the base price.
    pub final_price: Decimal,
    /// Nonzero adjustments in evaluation order.
    pub adjustments: Vec<PriceAdjustment>,
    /// True when the half-price floor raised the price.
    pub floor_applied: bool,
    /// Every rule evaluated, including those that did not apply.
    pub audit_trace: Vec<AuditStep>,
}

impl PriceQuote {
    /// Sum of all adjustment amounts, before the floor.
    pub fn total_adjustment(&self) -> Decimal {
        self.adjustments.iter().map(|a| a.amount).sum()
    }
}

/// Refund band selected by days until departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefundTier {
    /// 30 or more days out: 90% refund.
    Early,
    /// 7 to 29 days out: 50% refund.
    Standard,
    /// Fewer than 7 days out: no refund.
    Late,
}

impl RefundTier {
    /// Fraction of the paid price that is refunded.
    pub fn refund_rate(self) -> Decimal {
        match self {
            RefundTier::Early => Decimal::new(90, 2),
            RefundTier::Standard => Decimal::new(50, 2),
            RefundTier::Late => Decimal::ZERO,
        }
    }
}

/// Result of applying the cancellation policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefundQuote {
    /// Inclusive day count until departure.
    pub days_until_departure: i64,
    /// The selected band.
    pub tier: RefundTier,
    /// Amount returned to the passenger.
    pub refund_amount: Decimal,
}
