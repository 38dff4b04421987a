//! Application state for the Flight Booking Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::clock::Clock;
use crate::config::BookingConfig;
use crate::engine::BookingEngine;
use crate::error::EngineResult;
use crate::store::MemoryStore;

/// Shared application state.
///
/// Holds the booking engine over the in-memory store. Cloning shares the
/// same engine.
#[derive(Clone)]
pub struct AppState {
    engine: Arc<BookingEngine<MemoryStore>>,
}

impl AppState {
    /// Creates a new application state around an engine.
    pub fn new(engine: BookingEngine<MemoryStore>) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    /// Seeds a fresh in-memory store from `config` and wraps it in an engine.
    pub fn from_config(config: &BookingConfig, clock: Arc<dyn Clock>) -> EngineResult<Self> {
        let store = MemoryStore::from_config(config)?;
        Ok(Self::new(BookingEngine::new(store, clock)))
    }

    /// Returns the booking engine.
    pub fn engine(&self) -> &BookingEngine<MemoryStore> {
        &self.engine
    }
}
