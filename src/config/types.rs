//! Configuration types for the booking engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{Flight, Passenger, SeatClass};

/// Seat class catalogue file structure (`seat_classes.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct SeatClassesConfig {
    /// The fare classes offered on every flight.
    pub seat_classes: Vec<SeatClass>,
}

/// Inventory seed file structure (`inventory.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    /// Scheduled flights.
    pub flights: Vec<Flight>,
    /// Registered passengers.
    #[serde(default)]
    pub passengers: Vec<Passenger>,
}

/// The complete booking configuration loaded from YAML files.
///
/// Construct it through [`BookingConfig::new`], which validates the
/// combined files before any store is seeded from them.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// Fare classes, in file order.
    pub seat_classes: Vec<SeatClass>,
    /// Flights, in file order.
    pub flights: Vec<Flight>,
    /// Passengers, in file order.
    pub passengers: Vec<Passenger>,
}

impl BookingConfig {
    /// Combines the configuration files and validates them.
    ///
    /// Returns `InvalidConfig` for duplicate identifiers, non-positive base
    /// prices, empty seat layouts, or flights that arrive before they depart.
    pub fn new(classes: SeatClassesConfig, inventory: InventoryConfig) -> EngineResult<Self> {
        let config = Self {
            seat_classes: classes.seat_classes,
            flights: inventory.flights,
            passengers: inventory.passengers,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> EngineResult<()> {
        if self.seat_classes.is_empty() {
            return Err(invalid("at least one seat class is required".to_string()));
        }

        let mut names = HashSet::new();
        for class in &self.seat_classes {
            if !names.insert(class.name.as_str()) {
                return Err(invalid(format!("duplicate seat class '{}'", class.name)));
            }
            if class.base_price <= Decimal::ZERO {
                return Err(invalid(format!(
                    "seat class '{}' must have a positive base price",
                    class.name
                )));
            }
            if class.total_seats() == 0 {
                return Err(invalid(format!("seat class '{}' has no seats", class.name)));
            }
        }

        let mut flight_ids = HashSet::new();
        for flight in &self.flights {
            if !flight_ids.insert(flight.flight_id.as_str()) {
                return Err(invalid(format!("duplicate flight '{}'", flight.flight_id)));
            }
            if flight.arrival < flight.departure {
                return Err(invalid(format!(
                    "flight '{}' arrives before it departs",
                    flight.flight_id
                )));
            }
        }

        let mut passenger_ids = HashSet::new();
        for passenger in &self.passengers {
            if !passenger_ids.insert(passenger.passenger_id.as_str()) {
                return Err(invalid(format!(
                    "duplicate passenger '{}'",
                    passenger.passenger_id
                )));
            }
        }

        Ok(())
    }

    /// Gets a seat class by name.
    pub fn seat_class(&self, name: &str) -> EngineResult<&SeatClass> {
        self.seat_classes
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| EngineError::SeatClassNotFound {
                class_name: name.to_string(),
            })
    }
}

fn invalid(message: String) -> EngineError {
    EngineError::InvalidConfig { message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeatLayout;

    fn classes(prices: &[(&str, i64)]) -> SeatClassesConfig {
        SeatClassesConfig {
            seat_classes: prices
                .iter()
                .map(|(name, price)| SeatClass {
                    name: name.to_string(),
                    description: String::new(),
                    base_price: Decimal::new(*price, 0),
                    layout: SeatLayout {
                        first_row: 1,
                        rows: 1,
                        letters: "AB".to_string(),
                    },
                })
                .collect(),
        }
    }

    fn inventory(yaml: &str) -> InventoryConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    const ONE_FLIGHT: &str = r#"
flights:
  - flight_id: F001
    airline: Airline A
    departure: "2025-03-01T10:00:00"
    arrival: "2025-03-01T14:00:00"
    origin: City A
    destination: City B
"#;

    #[test]
    fn test_passengers_default_to_empty() {
        let config = BookingConfig::new(classes(&[("Economy", 300)]), inventory(ONE_FLIGHT));
        assert!(config.unwrap().passengers.is_empty());
    }

    #[test]
    fn test_duplicate_class_is_invalid() {
        let result = BookingConfig::new(
            classes(&[("Economy", 300), ("Economy", 200)]),
            inventory(ONE_FLIGHT),
        );
        match result {
            Err(EngineError::InvalidConfig { message }) => assert!(message.contains("Economy")),
            other => panic!("Expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_base_price_is_invalid() {
        let result = BookingConfig::new(classes(&[("Economy", 0)]), inventory(ONE_FLIGHT));
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_flight_arriving_before_departure_is_invalid() {
        let yaml = ONE_FLIGHT.replace("2025-03-01T14:00:00", "2025-03-01T09:00:00");
        let result = BookingConfig::new(classes(&[("Economy", 300)]), inventory(&yaml));
        assert!(matches!(result, Err(EngineError::InvalidConfig { .. })));
    }

    #[test]
    fn test_seat_class_lookup() {
        let config =
            BookingConfig::new(classes(&[("First", 3000)]), inventory(ONE_FLIGHT)).unwrap();
        assert_eq!(config.seat_class("First").unwrap().base_price, Decimal::new(3000, 0));
        assert!(matches!(
            config.seat_class("Premium"),
            Err(EngineError::SeatClassNotFound { .. })
        ));
    }
}
