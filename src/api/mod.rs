//! HTTP API module for the Flight Booking Engine.
//!
//! This module exposes the booking engine operations as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CreateBookingRequest;
pub use response::{ApiError, ApiErrorResponse, status_for};
pub use state::AppState;
