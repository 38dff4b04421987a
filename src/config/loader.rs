//! Configuration loader for booking engine YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{BookingConfig, InventoryConfig, SeatClassesConfig};

/// Loads the seat class catalogue and inventory seed from a directory.
///
/// The directory structure is expected to be:
/// ```text
/// config/default/
/// ├── seat_classes.yaml  # Fare classes, base prices, seat layouts
/// └── inventory.yaml     # Flights and passengers
/// ```
///
/// # Example
///
/// ```no_run
/// use flight_booking_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// for class in &loader.config().seat_classes {
///     println!("{}: ${}", class.name, class.base_price);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: BookingConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The combined configuration fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let classes = Self::load_yaml::<SeatClassesConfig>(&path.join("seat_classes.yaml"))?;
        let inventory = Self::load_yaml::<InventoryConfig>(&path.join("inventory.yaml"))?;

        let config = BookingConfig::new(classes, inventory)?;
        tracing::debug!(
            path = %path.display(),
            seat_classes = config.seat_classes.len(),
            flights = config.flights.len(),
            passengers = config.passengers.len(),
            "Configuration loaded"
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> BookingConfig {
        self.config
    }
}
