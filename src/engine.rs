//! The booking orchestrator.
//!
//! [`BookingEngine`] ties the store, the pricing pipeline and the refund
//! policy together. Each mutating operation runs inside one store
//! transaction, so either every write of the operation lands or none does.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Booking, BookingConfirmation, BookingDetails, BookingHistoryEntry, BookingId, BookingRequest,
    BookingStatus, CancellationReceipt, ClassAvailability, Flight, FlightKey, NewBooking,
    Passenger, PassengerKey, Seat, SeatId,
};
use crate::pricing::{PricingContext, calculate_refund, loyalty_window_start, quote_price};
use crate::store::{BookingStore, StoreTransaction};

/// Books and cancels seats against a [`BookingStore`].
pub struct BookingEngine<S> {
    store: S,
    clock: Arc<dyn Clock>,
}

impl<S: BookingStore> BookingEngine<S> {
    /// Creates an engine over `store` that reads the time from `clock`.
    pub fn new(store: S, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Returns the engine's time source.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    /// Reserves a seat, prices it and records a confirmed booking.
    ///
    /// Preconditions are checked in order: the passenger must exist, then
    /// the flight, then an available seat of the requested class. Occupancy
    /// and the loyalty count are read before the seat is claimed.
    ///
    /// # Errors
    ///
    /// * `PassengerNotFound` - no passenger with the given id
    /// * `FlightNotFound` - no flight with the given id
    /// * `NoSeatsAvailable` - the class is sold out or not offered on the flight
    pub fn create_booking(&self, request: &BookingRequest) -> EngineResult<BookingConfirmation> {
        let start_time = Instant::now();
        let mut tx = self.store.begin()?;

        let passenger = tx.find_passenger(&request.passenger_id)?.ok_or_else(|| {
            EngineError::PassengerNotFound {
                passenger_id: request.passenger_id.clone(),
            }
        })?;
        let flight =
            tx.find_flight(&request.flight_id)?
                .ok_or_else(|| EngineError::FlightNotFound {
                    flight_id: request.flight_id.clone(),
                })?;

        let no_seats = || EngineError::NoSeatsAvailable {
            flight_id: flight.flight_id.clone(),
            class_name: request.seat_class.clone(),
        };
        let Some(seat) = tx.find_available_seat(flight.key, &request.seat_class)? else {
            warn!(
                flight_id = %flight.flight_id,
                seat_class = %request.seat_class,
                "No seats available"
            );
            return Err(no_seats());
        };
        let seat_class =
            tx.seat_class(&request.seat_class)?
                .ok_or_else(|| EngineError::SeatClassNotFound {
                    class_name: request.seat_class.clone(),
                })?;

        let occupancy = tx.occupancy(flight.key, &seat_class.name)?;
        let prior_bookings = tx.count_confirmed_bookings(
            passenger.key,
            loyalty_window_start(request.booking_date),
            request.booking_date,
        )?;

        let quote = quote_price(&PricingContext {
            base_price: seat_class.base_price,
            booking_date: request.booking_date,
            departure: flight.departure,
            occupancy,
            prior_bookings,
        });
        debug!(
            flight_id = %flight.flight_id,
            seat_class = %seat_class.name,
            booked = occupancy.booked,
            total = occupancy.total,
            prior_bookings,
            final_price = %quote.final_price,
            "Price computed"
        );

        tx.mark_seat_unavailable(seat.id).map_err(|err| match err {
            EngineError::AlreadyReserved { .. } => no_seats(),
            other => other,
        })?;
        let booking_id = tx.insert_booking(NewBooking {
            passenger: passenger.key,
            flight: flight.key,
            seat: seat.id,
            booking_date: request.booking_date,
            departure: flight.departure,
            price: quote.final_price,
        })?;
        tx.commit()?;

        info!(
            booking_id = %booking_id,
            passenger_id = %passenger.passenger_id,
            flight_id = %flight.flight_id,
            seat = %seat.seat_number,
            price = %quote.final_price,
            duration_us = start_time.elapsed().as_micros(),
            "Booking confirmed"
        );

        Ok(BookingConfirmation {
            booking_id,
            passenger_id: passenger.passenger_id,
            flight_id: flight.flight_id,
            seat: seat.seat_number,
            seat_class: seat_class.name,
            price: quote.final_price,
            status: BookingStatus::Confirmed,
            adjustments: quote.adjustments,
            audit_trace: quote.audit_trace,
        })
    }

    /// Cancels a confirmed booking, releases its seat and computes the refund.
    ///
    /// The refund tier is chosen from the days between the clock's current
    /// time and the flight's departure.
    ///
    /// # Errors
    ///
    /// * `BookingNotFound` - no booking with the given id
    /// * `AlreadyCancelled` - the booking was cancelled before
    pub fn cancel_booking(&self, booking_id: BookingId) -> EngineResult<CancellationReceipt> {
        let mut tx = self.store.begin()?;

        let booking = load_booking(&tx, booking_id)?;
        if booking.status.is_cancelled() {
            warn!(booking_id = %booking_id, "Booking already cancelled");
            return Err(EngineError::AlreadyCancelled {
                booking_id: booking_id.to_string(),
            });
        }

        let refund = calculate_refund(booking.price, booking.departure, self.clock.now_naive());

        tx.set_booking_status(booking_id, BookingStatus::Cancelled)?;
        tx.mark_seat_available(booking.seat)?;
        tx.commit()?;

        info!(
            booking_id = %booking_id,
            days_until_departure = refund.days_until_departure,
            refund = %refund.refund_amount,
            "Booking cancelled"
        );

        Ok(CancellationReceipt {
            booking_id,
            status: BookingStatus::Cancelled,
            refund_amount: refund.refund_amount,
            refund_tier: refund.tier,
            days_until_departure: refund.days_until_departure,
        })
    }

    /// Returns a booking joined with its passenger, flight and seat.
    pub fn get_booking_details(&self, booking_id: BookingId) -> EngineResult<BookingDetails> {
        let tx = self.store.begin()?;

        let booking = load_booking(&tx, booking_id)?;
        let passenger = passenger_by_key(&tx, booking.passenger)?;
        let flight = flight_by_key(&tx, booking.flight)?;
        let seat = seat_by_id(&tx, booking.seat)?;

        Ok(BookingDetails {
            booking_id: booking.id,
            passenger_id: passenger.passenger_id,
            flight_id: flight.flight_id,
            seat_number: seat.seat_number,
            class_name: seat.class_name,
            booking_date: booking.booking_date,
            price: booking.price,
            status: booking.status,
            departure: flight.departure,
            arrival: flight.arrival,
            origin: flight.origin,
            destination: flight.destination,
        })
    }

    /// Returns every booking of a passenger, newest booking date first.
    ///
    /// Bookings made on the same date are ordered by id, newest first.
    /// Cancelled bookings are included.
    pub fn get_passenger_history(
        &self,
        passenger_id: &str,
    ) -> EngineResult<Vec<BookingHistoryEntry>> {
        let tx = self.store.begin()?;

        let passenger = tx.find_passenger(passenger_id)?.ok_or_else(|| {
            EngineError::PassengerNotFound {
                passenger_id: passenger_id.to_string(),
            }
        })?;

        let mut bookings = tx.bookings_for_passenger(passenger.key)?;
        bookings.sort_by(|a, b| {
            b.booking_date
                .cmp(&a.booking_date)
                .then_with(|| b.id.cmp(&a.id))
        });

        bookings
            .into_iter()
            .map(|booking| {
                let flight = flight_by_key(&tx, booking.flight)?;
                let seat = seat_by_id(&tx, booking.seat)?;
                Ok(BookingHistoryEntry {
                    booking_id: booking.id,
                    flight_id: flight.flight_id,
                    booking_date: booking.booking_date,
                    status: booking.status,
                    price: booking.price,
                    seat_number: seat.seat_number,
                    class_name: seat.class_name,
                    departure: flight.departure,
                    arrival: flight.arrival,
                    origin: flight.origin,
                    destination: flight.destination,
                })
            })
            .collect()
    }

    /// Returns the schedule of a flight.
    pub fn get_flight(&self, flight_id: &str) -> EngineResult<Flight> {
        let tx = self.store.begin()?;
        find_flight(&tx, flight_id)
    }

    /// Returns total and available seats per class for a flight.
    pub fn seat_availability(&self, flight_id: &str) -> EngineResult<Vec<ClassAvailability>> {
        let tx = self.store.begin()?;
        let flight = find_flight(&tx, flight_id)?;
        tx.class_availability(flight.key)
    }
}

fn load_booking<T: StoreTransaction>(tx: &T, booking_id: BookingId) -> EngineResult<Booking> {
    tx.booking(booking_id)?
        .ok_or_else(|| EngineError::BookingNotFound {
            booking_id: booking_id.to_string(),
        })
}

fn find_flight<T: StoreTransaction>(tx: &T, flight_id: &str) -> EngineResult<Flight> {
    tx.find_flight(flight_id)?
        .ok_or_else(|| EngineError::FlightNotFound {
            flight_id: flight_id.to_string(),
        })
}

// The ledger only references rows that existed when the booking was made,
// so a miss below means the store lost data underneath us.

fn passenger_by_key<T: StoreTransaction>(tx: &T, key: PassengerKey) -> EngineResult<Passenger> {
    tx.passenger(key)?
        .ok_or_else(|| EngineError::PassengerNotFound {
            passenger_id: format!("#{}", key.0),
        })
}

fn flight_by_key<T: StoreTransaction>(tx: &T, key: FlightKey) -> EngineResult<Flight> {
    tx.flight(key)?.ok_or_else(|| EngineError::FlightNotFound {
        flight_id: format!("#{}", key.0),
    })
}

fn seat_by_id<T: StoreTransaction>(tx: &T, seat: SeatId) -> EngineResult<Seat> {
    tx.seat(seat)?
        .ok_or_else(|| EngineError::TransactionConflict {
            message: format!("seat {seat} referenced by a booking does not exist"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::models::{AdjustmentKind, RefundTier, SeatClass, SeatLayout};
    use crate::store::MemoryStore;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use std::sync::Barrier;
    use std::thread;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn midnight(day: NaiveDate) -> NaiveDateTime {
        day.and_hms_opt(0, 0, 0).unwrap()
    }

    fn departure() -> NaiveDateTime {
        date(2025, 3, 1).and_hms_opt(10, 0, 0).unwrap()
    }

    fn class(name: &str, price: i64, first_row: u32, rows: u32, letters: &str) -> SeatClass {
        SeatClass {
            name: name.to_string(),
            description: format!("{name} Class"),
            base_price: Decimal::new(price, 0),
            layout: SeatLayout {
                first_row,
                rows,
                letters: letters.to_string(),
            },
        }
    }

    fn store_with(classes: Vec<SeatClass>) -> MemoryStore {
        let store = MemoryStore::new();
        for c in classes {
            store.add_seat_class(c).unwrap();
        }
        store
            .add_flight(Flight {
                key: FlightKey::default(),
                flight_id: "F001".to_string(),
                airline: "Airline A".to_string(),
                departure: departure(),
                arrival: departure() + Duration::hours(4),
                origin: "City A".to_string(),
                destination: "City B".to_string(),
            })
            .unwrap();
        for id in ["P001", "P002"] {
            store
                .add_passenger(Passenger {
                    key: PassengerKey::default(),
                    passenger_id: id.to_string(),
                    first_name: "Levi".to_string(),
                    last_name: "Ackerman".to_string(),
                    email: "ackerman@example.com".to_string(),
                    phone: "090999999".to_string(),
                })
                .unwrap();
        }
        store
    }

    fn standard_store() -> MemoryStore {
        store_with(vec![
            class("First", 3000, 1, 2, "ABCDEF"),
            class("Business", 1000, 3, 2, "ABCDEF"),
            class("Economy", 300, 5, 6, "ABCDEF"),
        ])
    }

    fn engine_at(store: MemoryStore, now: NaiveDateTime) -> BookingEngine<MemoryStore> {
        BookingEngine::new(store, Arc::new(FixedClock::at(now)))
    }

    fn request(passenger: &str, class: &str, booking_date: NaiveDate) -> BookingRequest {
        BookingRequest {
            passenger_id: passenger.to_string(),
            flight_id: "F001".to_string(),
            seat_class: class.to_string(),
            booking_date,
        }
    }

    #[test]
    fn test_book_then_cancel_30_days_out() {
        let booked = date(2025, 1, 30);
        let engine = engine_at(standard_store(), midnight(booked));

        let confirmation = engine.create_booking(&request("P002", "Economy", booked)).unwrap();
        assert_eq!(confirmation.price, dec("270"));
        assert_eq!(confirmation.status, BookingStatus::Confirmed);
        assert_eq!(confirmation.booking_id.to_string(), "B00001");
        assert_eq!(confirmation.adjustments.len(), 1);
        assert_eq!(confirmation.adjustments[0].kind, AdjustmentKind::EarlyBooking);

        let receipt = engine.cancel_booking(confirmation.booking_id).unwrap();
        assert_eq!(receipt.status, BookingStatus::Cancelled);
        assert_eq!(receipt.refund_tier, RefundTier::Early);
        assert_eq!(receipt.refund_amount, dec("243"));
    }

    #[test]
    fn test_book_in_gap_band_and_cancel_same_day() {
        let booked = date(2025, 2, 1);
        let engine = engine_at(standard_store(), midnight(booked));

        let confirmation = engine.create_booking(&request("P002", "Economy", booked)).unwrap();
        assert_eq!(confirmation.price, dec("300"));
        assert!(confirmation.adjustments.is_empty());

        let receipt = engine.cancel_booking(confirmation.booking_id).unwrap();
        assert_eq!(receipt.days_until_departure, 30);
        assert_eq!(receipt.refund_amount, dec("270"));
    }

    #[test]
    fn test_refund_uses_clock_not_booking_date() {
        let booked = date(2025, 1, 1);
        let engine = engine_at(standard_store(), midnight(date(2025, 2, 26)));

        let confirmation = engine.create_booking(&request("P001", "Business", booked)).unwrap();
        assert_eq!(confirmation.price, dec("900"));

        let receipt = engine.cancel_booking(confirmation.booking_id).unwrap();
        assert_eq!(receipt.refund_tier, RefundTier::Late);
        assert_eq!(receipt.refund_amount, Decimal::ZERO);
    }

    #[test]
    fn test_cancelling_twice_fails_and_releases_seat_once() {
        let booked = date(2025, 2, 1);
        let engine = engine_at(store_with(vec![class("First", 3000, 1, 1, "A")]), midnight(booked));
        // (total, available) for the only class on the flight
        let first_class = || {
            let availability = engine.seat_availability("F001").unwrap();
            assert_eq!(availability.len(), 1);
            (availability[0].total, availability[0].available)
        };
        assert_eq!(first_class(), (1, 1));

        let first = engine.create_booking(&request("P001", "First", booked)).unwrap();
        assert_eq!(first_class(), (1, 0));
        assert!(matches!(
            engine.create_booking(&request("P002", "First", booked)),
            Err(EngineError::NoSeatsAvailable { .. })
        ));
        assert_eq!(first_class(), (1, 0));

        engine.cancel_booking(first.booking_id).unwrap();
        assert_eq!(first_class(), (1, 1));
        match engine.cancel_booking(first.booking_id) {
            Err(EngineError::AlreadyCancelled { booking_id }) => {
                assert_eq!(booking_id, "B00001")
            }
            other => panic!("Expected AlreadyCancelled, got {other:?}"),
        }
        assert_eq!(first_class(), (1, 1));

        let second = engine.create_booking(&request("P002", "First", booked)).unwrap();
        assert_eq!(second.seat, first.seat);
        assert_eq!(first_class(), (1, 0));
    }

    #[test]
    fn test_cancel_unknown_booking() {
        let engine = engine_at(standard_store(), departure());
        assert!(matches!(
            engine.cancel_booking(BookingId(99)),
            Err(EngineError::BookingNotFound { .. })
        ));
    }

    #[test]
    fn test_preconditions_are_checked_in_order() {
        let booked = date(2025, 2, 1);
        let engine = engine_at(standard_store(), midnight(booked));

        let mut req = request("P404", "Premium", booked);
        req.flight_id = "F404".to_string();
        assert!(matches!(
            engine.create_booking(&req),
            Err(EngineError::PassengerNotFound { .. })
        ));

        req.passenger_id = "P001".to_string();
        assert!(matches!(
            engine.create_booking(&req),
            Err(EngineError::FlightNotFound { .. })
        ));

        req.flight_id = "F001".to_string();
        assert!(matches!(
            engine.create_booking(&req),
            Err(EngineError::NoSeatsAvailable { .. })
        ));
    }

    #[test]
    fn test_failed_booking_leaves_no_trace() {
        let booked = date(2025, 2, 1);
        let engine = engine_at(standard_store(), midnight(booked));

        let before = engine.seat_availability("F001").unwrap();
        let _ = engine.create_booking(&request("P404", "Economy", booked));
        let _ = engine.create_booking(&request("P001", "Premium", booked));

        assert_eq!(engine.seat_availability("F001").unwrap(), before);
        assert!(engine.get_passenger_history("P001").unwrap().is_empty());
        let next = engine.create_booking(&request("P001", "Economy", booked)).unwrap();
        assert_eq!(next.booking_id, BookingId(1));
    }

    #[test]
    fn test_occupancy_surcharge_uses_state_before_booking() {
        // 5 seats: the 4th booking sees 3/5 = 0.6, the 5th sees 4/5 = 0.8
        let booked = date(2025, 2, 10);
        let engine = engine_at(
            store_with(vec![class("Economy", 300, 5, 1, "ABCDE")]),
            midnight(booked),
        );

        let prices: Vec<Decimal> = (0..5)
            .map(|_| {
                engine
                    .create_booking(&request("P001", "Economy", booked))
                    .unwrap()
                    .price
            })
            .collect();
        assert_eq!(
            prices,
            vec![dec("300"), dec("300"), dec("300"), dec("330"), dec("360")]
        );
        assert!(matches!(
            engine.create_booking(&request("P001", "Economy", booked)),
            Err(EngineError::NoSeatsAvailable { .. })
        ));
    }

    #[test]
    fn test_loyalty_counts_only_confirmed_bookings_in_window() {
        let engine = engine_at(standard_store(), departure());

        // Five confirmed bookings in the window, one cancelled.
        for day in 1..=6 {
            engine
                .create_booking(&request("P002", "Economy", date(2025, 2, day)))
                .unwrap();
        }
        engine.cancel_booking(BookingId(6)).unwrap();

        let sixth = engine
            .create_booking(&request("P002", "First", date(2025, 2, 10)))
            .unwrap();
        let kinds: Vec<_> = sixth.adjustments.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![AdjustmentKind::FrequentFlyer]);
        assert_eq!(sixth.price, dec("2700"));

        // The same history no longer counts a year and a day later.
        let later = engine
            .create_booking(&request("P002", "First", date(2026, 2, 11)))
            .unwrap();
        assert!(
            !later
                .adjustments
                .iter()
                .any(|a| a.kind == AdjustmentKind::FrequentFlyer)
        );
    }

    #[test]
    fn test_booking_details_join() {
        let booked = date(2025, 2, 1);
        let engine = engine_at(standard_store(), midnight(booked));
        let confirmation = engine.create_booking(&request("P002", "Business", booked)).unwrap();

        let details = engine.get_booking_details(confirmation.booking_id).unwrap();
        assert_eq!(details.passenger_id, "P002");
        assert_eq!(details.flight_id, "F001");
        assert_eq!(details.class_name, "Business");
        assert_eq!(details.seat_number, confirmation.seat);
        assert_eq!(details.price, dec("1000"));
        assert_eq!(details.departure, departure());
        assert_eq!(details.origin, "City A");

        assert!(matches!(
            engine.get_booking_details(BookingId(42)),
            Err(EngineError::BookingNotFound { .. })
        ));
    }

    #[test]
    fn test_history_is_newest_first_and_includes_cancelled() {
        let engine = engine_at(standard_store(), departure());
        let dates = [date(2025, 1, 5), date(2025, 2, 1), date(2025, 1, 20), date(2025, 2, 1)];
        for d in dates {
            engine.create_booking(&request("P001", "Economy", d)).unwrap();
        }
        engine.cancel_booking(BookingId(3)).unwrap();

        let history = engine.get_passenger_history("P001").unwrap();
        let ids: Vec<u64> = history.iter().map(|h| h.booking_id.0).collect();
        assert_eq!(ids, vec![4, 2, 3, 1]);
        assert_eq!(history[2].status, BookingStatus::Cancelled);
        assert!(engine.get_passenger_history("P002").unwrap().is_empty());
        assert!(matches!(
            engine.get_passenger_history("P404"),
            Err(EngineError::PassengerNotFound { .. })
        ));
    }

    #[test]
    fn test_flight_lookup_and_availability() {
        let engine = engine_at(standard_store(), departure());
        let flight = engine.get_flight("F001").unwrap();
        assert_eq!(flight.airline, "Airline A");
        assert_eq!(flight.duration_minutes(), 240);

        let availability = engine.seat_availability("F001").unwrap();
        let totals: Vec<(&str, u32)> = availability
            .iter()
            .map(|a| (a.class_name.as_str(), a.total))
            .collect();
        assert_eq!(totals, vec![("Business", 12), ("Economy", 36), ("First", 12)]);

        assert!(matches!(
            engine.get_flight("F999"),
            Err(EngineError::FlightNotFound { .. })
        ));
    }

    #[test]
    fn test_concurrent_bookings_for_last_seat() {
        let booked = date(2025, 2, 1);
        let engine = Arc::new(engine_at(
            store_with(vec![class("First", 3000, 1, 1, "A")]),
            midnight(booked),
        ));
        let barrier = Arc::new(Barrier::new(2));

        let handles: Vec<_> = ["P001", "P002"]
            .into_iter()
            .map(|passenger| {
                let engine = Arc::clone(&engine);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    engine.create_booking(&request(passenger, "First", booked))
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let successes = results.iter().filter(|r| r.is_ok()).count();
        let sold_out = results
            .iter()
            .filter(|r| matches!(r, Err(EngineError::NoSeatsAvailable { .. })))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(sold_out, 1);
    }

    #[test]
    fn test_seat_count_is_conserved_across_many_threads() {
        let booked = date(2025, 2, 1);
        let engine = Arc::new(engine_at(
            store_with(vec![class("Economy", 300, 5, 2, "ABCDEF")]),
            midnight(booked),
        ));

        let handles: Vec<_> = (0..20)
            .map(|i| {
                let engine = Arc::clone(&engine);
                thread::spawn(move || {
                    let passenger = if i % 2 == 0 { "P001" } else { "P002" };
                    engine.create_booking(&request(passenger, "Economy", booked))
                })
            })
            .collect();

        let confirmed: Vec<_> = handles
            .into_iter()
            .filter_map(|h| h.join().unwrap().ok())
            .collect();
        assert_eq!(confirmed.len(), 12);

        let mut seats: Vec<_> = confirmed.iter().map(|c| c.seat.clone()).collect();
        seats.sort();
        seats.dedup();
        assert_eq!(seats.len(), 12);
        assert_eq!(engine.seat_availability("F001").unwrap()[0].available, 0);
    }
}
