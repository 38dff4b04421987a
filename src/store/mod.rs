//! Persistence boundary for the booking engine.
//!
//! The engine talks to storage only through [`BookingStore`] and the
//! transactions it hands out. Every read and write of one engine operation
//! happens inside a single [`StoreTransaction`]; nothing becomes visible to
//! other transactions until [`StoreTransaction::commit`] succeeds, and a
//! transaction dropped without committing leaves the store untouched.

mod memory;

pub use memory::{MemoryStore, MemoryTransaction};

use chrono::NaiveDate;

use crate::error::EngineResult;
use crate::models::{
    Booking, BookingId, BookingStatus, ClassAvailability, Flight, FlightKey, NewBooking,
    Passenger, PassengerKey, Seat, SeatClass, SeatId, SeatOccupancy,
};

/// A store that can open transactions.
pub trait BookingStore: Send + Sync {
    /// The transaction type handed out by [`BookingStore::begin`].
    type Tx<'a>: StoreTransaction
    where
        Self: 'a;

    /// Opens a new transaction.
    ///
    /// Returns [`EngineError::TransactionConflict`](crate::error::EngineError::TransactionConflict)
    /// if the store cannot isolate a new unit of work.
    fn begin(&self) -> EngineResult<Self::Tx<'_>>;
}

/// One isolated unit of work against the store.
pub trait StoreTransaction {
    /// Looks up a passenger by external id.
    fn find_passenger(&self, passenger_id: &str) -> EngineResult<Option<Passenger>>;

    /// Looks up a passenger by internal key.
    fn passenger(&self, key: PassengerKey) -> EngineResult<Option<Passenger>>;

    /// Looks up a flight by external id.
    fn find_flight(&self, flight_id: &str) -> EngineResult<Option<Flight>>;

    /// Looks up a flight by internal key.
    fn flight(&self, key: FlightKey) -> EngineResult<Option<Flight>>;

    /// Looks up a seat class by name.
    fn seat_class(&self, class_name: &str) -> EngineResult<Option<SeatClass>>;

    /// Returns any currently available seat of `class_name` on `flight`.
    ///
    /// Which seat is returned is unspecified.
    fn find_available_seat(&self, flight: FlightKey, class_name: &str)
    -> EngineResult<Option<Seat>>;

    /// Looks up a seat by id.
    fn seat(&self, seat: SeatId) -> EngineResult<Option<Seat>>;

    /// Claims a seat, failing with `AlreadyReserved` if it is already taken.
    ///
    /// This is a compare-and-set: the availability check and the update are
    /// one step.
    fn mark_seat_unavailable(&mut self, seat: SeatId) -> EngineResult<()>;

    /// Releases a seat. Releasing an available seat is a no-op.
    fn mark_seat_available(&mut self, seat: SeatId) -> EngineResult<()>;

    /// Counts booked and total seats of one class on one flight.
    fn occupancy(&self, flight: FlightKey, class_name: &str) -> EngineResult<SeatOccupancy>;

    /// Per-class seat totals and availability for a flight, ordered by class name.
    fn class_availability(&self, flight: FlightKey) -> EngineResult<Vec<ClassAvailability>>;

    /// Counts a passenger's confirmed bookings with a booking date in
    /// `[from, to]`, both ends inclusive.
    fn count_confirmed_bookings(
        &self,
        passenger: PassengerKey,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<u32>;

    /// Appends a booking to the ledger and returns its new id.
    fn insert_booking(&mut self, booking: NewBooking) -> EngineResult<BookingId>;

    /// Looks up a booking by id.
    fn booking(&self, id: BookingId) -> EngineResult<Option<Booking>>;

    /// Overwrites the status of an existing booking.
    fn set_booking_status(&mut self, id: BookingId, status: BookingStatus) -> EngineResult<()>;

    /// All bookings of a passenger, in ledger order.
    fn bookings_for_passenger(&self, passenger: PassengerKey) -> EngineResult<Vec<Booking>>;

    /// Makes every change in this transaction visible atomically.
    fn commit(self) -> EngineResult<()>;
}
