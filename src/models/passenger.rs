//! Passenger model.
//!
//! The booking engine only needs to know that a passenger exists; profile
//! maintenance happens elsewhere.

use serde::{Deserialize, Serialize};

/// Internal key of a passenger row in the store.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PassengerKey(pub u64);

/// A registered passenger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    /// Internal store key.
    #[serde(skip)]
    pub key: PassengerKey,
    /// External passenger identifier (e.g., "P001"), unique.
    pub passenger_id: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
}
