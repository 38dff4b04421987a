//! Configuration loading for the Flight Booking Engine.
//!
//! This module loads the seat class catalogue (names, base prices, seat
//! layouts) and the inventory seed (flights, passengers) from YAML files.
//! Pricing thresholds are fixed in code and are not configurable.
//!
//! # Example
//!
//! ```no_run
//! use flight_booking_engine::config::ConfigLoader;
//! use flight_booking_engine::store::MemoryStore;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! let store = MemoryStore::from_config(loader.config()).unwrap();
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BookingConfig, InventoryConfig, SeatClassesConfig};
