//! HTTP request handlers for the Flight Booking Engine API.
//!
//! This module contains the handler functions for all API endpoints. The
//! handlers only translate between HTTP and the engine; every rule lives in
//! [`BookingEngine`]. Engine calls take the store lock, so they run on the
//! blocking thread pool rather than on the async workers.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::engine::BookingEngine;
use crate::error::EngineError;
use crate::models::BookingId;
use crate::store::MemoryStore;

use super::request::CreateBookingRequest;
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/bookings", post(create_booking_handler))
        .route(
            "/bookings/:booking_id",
            get(get_booking_handler).delete(cancel_booking_handler),
        )
        .route(
            "/passengers/:passenger_id/bookings",
            get(passenger_history_handler),
        )
        .route("/flights/:flight_id", get(get_flight_handler))
        .route("/flights/:flight_id/seats", get(seat_availability_handler))
        .with_state(state)
}

/// Handler for POST /bookings.
///
/// Books a seat and returns the confirmation with its pricing breakdown.
async fn create_booking_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateBookingRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing booking request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return json_rejection(correlation_id, rejection),
    };
    if let Err(error) = request.validate() {
        warn!(correlation_id = %correlation_id, error = %error.message, "Invalid booking request");
        return ApiErrorResponse::bad_request(error).into_response();
    }

    let start_time = Instant::now();
    let result = run_engine(state, move |engine| {
        let today = engine.clock().now_naive().date();
        engine.create_booking(&request.into_booking_request(today))
    })
    .await;
    match result {
        Ok(confirmation) => {
            info!(
                correlation_id = %correlation_id,
                booking_id = %confirmation.booking_id,
                price = %confirmation.price,
                duration_us = start_time.elapsed().as_micros(),
                "Booking created"
            );
            json_response(StatusCode::CREATED, &confirmation)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for DELETE /bookings/:booking_id.
async fn cancel_booking_handler(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, booking_id = %booking_id, "Processing cancellation");

    let result = match booking_id.parse::<BookingId>() {
        Ok(id) => run_engine(state, move |engine| engine.cancel_booking(id)).await,
        Err(err) => Err(err),
    };
    match result {
        Ok(receipt) => {
            info!(
                correlation_id = %correlation_id,
                booking_id = %receipt.booking_id,
                refund = %receipt.refund_amount,
                "Cancellation completed"
            );
            json_response(StatusCode::OK, &receipt)
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /bookings/:booking_id.
async fn get_booking_handler(
    State(state): State<AppState>,
    Path(booking_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = match booking_id.parse::<BookingId>() {
        Ok(id) => run_engine(state, move |engine| engine.get_booking_details(id)).await,
        Err(err) => Err(err),
    };
    respond(correlation_id, result)
}

/// Handler for GET /passengers/:passenger_id/bookings.
async fn passenger_history_handler(
    State(state): State<AppState>,
    Path(passenger_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = run_engine(state, move |engine| {
        engine.get_passenger_history(&passenger_id)
    })
    .await;
    respond(correlation_id, result)
}

/// Handler for GET /flights/:flight_id.
async fn get_flight_handler(
    State(state): State<AppState>,
    Path(flight_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = run_engine(state, move |engine| engine.get_flight(&flight_id)).await;
    respond(correlation_id, result)
}

/// Handler for GET /flights/:flight_id/seats.
async fn seat_availability_handler(
    State(state): State<AppState>,
    Path(flight_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let result = run_engine(state, move |engine| engine.seat_availability(&flight_id)).await;
    respond(correlation_id, result)
}

/// Runs a synchronous engine operation on the blocking thread pool.
async fn run_engine<T, F>(state: AppState, operation: F) -> Result<T, EngineError>
where
    T: Send + 'static,
    F: FnOnce(&BookingEngine<MemoryStore>) -> Result<T, EngineError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || operation(state.engine()))
        .await
        .map_err(|err| EngineError::TransactionConflict {
            message: format!("engine task failed: {err}"),
        })?
}

fn respond<T: Serialize>(correlation_id: Uuid, result: Result<T, EngineError>) -> Response {
    match result {
        Ok(body) => json_response(StatusCode::OK, &body),
        Err(err) => engine_error(correlation_id, err),
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn engine_error(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        kind = ?err.kind(),
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}

fn json_rejection(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}
