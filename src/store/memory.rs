//! In-memory transactional store.
//!
//! All tables live behind one mutex. A transaction holds the lock for its
//! whole lifetime and writes straight to the shared tables, recording an
//! undo entry for every change. Commit forgets the entries; dropping an
//! uncommitted transaction replays them in reverse.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;
use tracing::debug;

use crate::config::BookingConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Booking, BookingId, BookingStatus, ClassAvailability, Flight, FlightKey, NewBooking,
    Passenger, PassengerKey, Seat, SeatClass, SeatId, SeatOccupancy,
};

use super::{BookingStore, StoreTransaction};

#[derive(Debug, Default)]
struct Tables {
    seat_classes: BTreeMap<String, SeatClass>,
    flights: BTreeMap<FlightKey, Flight>,
    passengers: BTreeMap<PassengerKey, Passenger>,
    seats: BTreeMap<SeatId, Seat>,
    bookings: BTreeMap<BookingId, Booking>,
    last_flight: u64,
    last_passenger: u64,
    last_seat: u64,
    last_booking: u64,
}

impl Tables {
    fn provision_seats(&mut self, flight: FlightKey, class: &SeatClass) {
        for seat_number in class.layout.seat_numbers() {
            self.last_seat += 1;
            let id = SeatId(self.last_seat);
            self.seats.insert(
                id,
                Seat {
                    id,
                    flight,
                    class_name: class.name.clone(),
                    seat_number,
                    is_available: true,
                },
            );
        }
    }

    fn seats_of<'a>(
        &'a self,
        flight: FlightKey,
        class_name: &'a str,
    ) -> impl Iterator<Item = &'a Seat> + 'a {
        self.seats
            .values()
            .filter(move |s| s.flight == flight && s.class_name == class_name)
    }
}

/// A [`BookingStore`] that keeps everything in process memory.
///
/// Cloning the store is cheap and every clone shares the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded from a loaded configuration.
    ///
    /// Seat classes are registered first so every flight receives the seat
    /// layout of every class.
    pub fn from_config(config: &BookingConfig) -> EngineResult<Self> {
        let store = Self::new();
        for class in &config.seat_classes {
            store.add_seat_class(class.clone())?;
        }
        for flight in &config.flights {
            store.add_flight(flight.clone())?;
        }
        for passenger in &config.passengers {
            store.add_passenger(passenger.clone())?;
        }
        Ok(store)
    }

    /// Registers a seat class and provisions its seats on every known flight.
    pub fn add_seat_class(&self, class: SeatClass) -> EngineResult<()> {
        let mut tables = self.lock()?;
        if tables.seat_classes.contains_key(&class.name) {
            return Err(EngineError::InvalidConfig {
                message: format!("duplicate seat class '{}'", class.name),
            });
        }
        let flights: Vec<FlightKey> = tables.flights.keys().copied().collect();
        for flight in flights {
            tables.provision_seats(flight, &class);
        }
        debug!(class_name = %class.name, seats = class.total_seats(), "Seat class registered");
        tables.seat_classes.insert(class.name.clone(), class);
        Ok(())
    }

    /// Adds a flight and provisions the seats of every registered class.
    pub fn add_flight(&self, mut flight: Flight) -> EngineResult<FlightKey> {
        let mut tables = self.lock()?;
        if tables
            .flights
            .values()
            .any(|f| f.flight_id == flight.flight_id)
        {
            return Err(EngineError::InvalidConfig {
                message: format!("duplicate flight '{}'", flight.flight_id),
            });
        }
        tables.last_flight += 1;
        let key = FlightKey(tables.last_flight);
        flight.key = key;

        let classes: Vec<SeatClass> = tables.seat_classes.values().cloned().collect();
        for class in &classes {
            tables.provision_seats(key, class);
        }
        debug!(flight_id = %flight.flight_id, "Flight provisioned");
        tables.flights.insert(key, flight);
        Ok(key)
    }

    /// Adds a passenger.
    pub fn add_passenger(&self, mut passenger: Passenger) -> EngineResult<PassengerKey> {
        let mut tables = self.lock()?;
        if tables
            .passengers
            .values()
            .any(|p| p.passenger_id == passenger.passenger_id)
        {
            return Err(EngineError::InvalidConfig {
                message: format!("duplicate passenger '{}'", passenger.passenger_id),
            });
        }
        tables.last_passenger += 1;
        let key = PassengerKey(tables.last_passenger);
        passenger.key = key;
        tables.passengers.insert(key, passenger);
        Ok(key)
    }

    fn lock(&self) -> EngineResult<MutexGuard<'_, Tables>> {
        self.tables
            .lock()
            .map_err(|_| EngineError::TransactionConflict {
                message: "store lock poisoned".to_string(),
            })
    }
}

impl BookingStore for MemoryStore {
    type Tx<'a> = MemoryTransaction<'a>;

    fn begin(&self) -> EngineResult<MemoryTransaction<'_>> {
        let guard = self.lock()?;
        Ok(MemoryTransaction {
            guard,
            undo: Vec::new(),
        })
    }
}

/// The inverse of one write made inside a transaction.
#[derive(Debug)]
enum Undo {
    SeatAvailability { seat: SeatId, was_available: bool },
    BookingStatus { id: BookingId, previous: BookingStatus },
    BookingInserted { id: BookingId },
}

impl Undo {
    fn revert(self, tables: &mut Tables) {
        match self {
            Undo::SeatAvailability {
                seat,
                was_available,
            } => {
                if let Some(record) = tables.seats.get_mut(&seat) {
                    record.is_available = was_available;
                }
            }
            Undo::BookingStatus { id, previous } => {
                if let Some(booking) = tables.bookings.get_mut(&id) {
                    booking.status = previous;
                }
            }
            Undo::BookingInserted { id } => {
                tables.bookings.remove(&id);
                tables.last_booking -= 1;
            }
        }
    }
}

/// A transaction over a [`MemoryStore`].
///
/// Holds the store lock until it is committed or dropped.
pub struct MemoryTransaction<'a> {
    guard: MutexGuard<'a, Tables>,
    undo: Vec<Undo>,
}

impl Drop for MemoryTransaction<'_> {
    fn drop(&mut self) {
        if !self.undo.is_empty() {
            debug!(changes = self.undo.len(), "Rolling back transaction");
        }
        let tables = &mut *self.guard;
        while let Some(change) = self.undo.pop() {
            change.revert(tables);
        }
    }
}

impl StoreTransaction for MemoryTransaction<'_> {
    fn find_passenger(&self, passenger_id: &str) -> EngineResult<Option<Passenger>> {
        Ok(self
            .guard
            .passengers
            .values()
            .find(|p| p.passenger_id == passenger_id)
            .cloned())
    }

    fn passenger(&self, key: PassengerKey) -> EngineResult<Option<Passenger>> {
        Ok(self.guard.passengers.get(&key).cloned())
    }

    fn find_flight(&self, flight_id: &str) -> EngineResult<Option<Flight>> {
        Ok(self
            .guard
            .flights
            .values()
            .find(|f| f.flight_id == flight_id)
            .cloned())
    }

    fn flight(&self, key: FlightKey) -> EngineResult<Option<Flight>> {
        Ok(self.guard.flights.get(&key).cloned())
    }

    fn seat_class(&self, class_name: &str) -> EngineResult<Option<SeatClass>> {
        Ok(self.guard.seat_classes.get(class_name).cloned())
    }

    fn find_available_seat(
        &self,
        flight: FlightKey,
        class_name: &str,
    ) -> EngineResult<Option<Seat>> {
        Ok(self
            .guard
            .seats_of(flight, class_name)
            .find(|s| s.is_available)
            .cloned())
    }

    fn seat(&self, seat: SeatId) -> EngineResult<Option<Seat>> {
        Ok(self.guard.seats.get(&seat).cloned())
    }

    fn mark_seat_unavailable(&mut self, seat: SeatId) -> EngineResult<()> {
        let record = self
            .guard
            .seats
            .get_mut(&seat)
            .ok_or_else(|| EngineError::TransactionConflict {
                message: format!("seat {seat} does not exist"),
            })?;
        if !record.is_available {
            return Err(EngineError::AlreadyReserved {
                seat: record.seat_number.clone(),
            });
        }
        record.is_available = false;
        self.undo.push(Undo::SeatAvailability {
            seat,
            was_available: true,
        });
        Ok(())
    }

    fn mark_seat_available(&mut self, seat: SeatId) -> EngineResult<()> {
        let record = self
            .guard
            .seats
            .get_mut(&seat)
            .ok_or_else(|| EngineError::TransactionConflict {
                message: format!("seat {seat} does not exist"),
            })?;
        if !record.is_available {
            record.is_available = true;
            self.undo.push(Undo::SeatAvailability {
                seat,
                was_available: false,
            });
        }
        Ok(())
    }

    fn occupancy(&self, flight: FlightKey, class_name: &str) -> EngineResult<SeatOccupancy> {
        let (booked, total) = self
            .guard
            .seats_of(flight, class_name)
            .fold((0u32, 0u32), |(booked, total), seat| {
                (booked + u32::from(!seat.is_available), total + 1)
            });
        Ok(SeatOccupancy { booked, total })
    }

    fn class_availability(&self, flight: FlightKey) -> EngineResult<Vec<ClassAvailability>> {
        let mut by_class: BTreeMap<&str, SeatOccupancy> = BTreeMap::new();
        for seat in self.guard.seats.values().filter(|s| s.flight == flight) {
            let occupancy = by_class
                .entry(seat.class_name.as_str())
                .or_insert(SeatOccupancy { booked: 0, total: 0 });
            occupancy.total += 1;
            occupancy.booked += u32::from(!seat.is_available);
        }
        Ok(by_class
            .into_iter()
            .map(|(class_name, occupancy)| ClassAvailability {
                class_name: class_name.to_string(),
                total: occupancy.total,
                available: occupancy.available(),
            })
            .collect())
    }

    fn count_confirmed_bookings(
        &self,
        passenger: PassengerKey,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<u32> {
        let count = self
            .guard
            .bookings
            .values()
            .filter(|b| {
                b.passenger == passenger
                    && b.status == BookingStatus::Confirmed
                    && b.booking_date >= from
                    && b.booking_date <= to
            })
            .count();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    fn insert_booking(&mut self, booking: NewBooking) -> EngineResult<BookingId> {
        self.guard.last_booking += 1;
        let id = BookingId(self.guard.last_booking);
        self.undo.push(Undo::BookingInserted { id });
        self.guard.bookings.insert(
            id,
            Booking {
                id,
                passenger: booking.passenger,
                flight: booking.flight,
                seat: booking.seat,
                booking_date: booking.booking_date,
                departure: booking.departure,
                price: booking.price,
                status: BookingStatus::Confirmed,
            },
        );
        Ok(id)
    }

    fn booking(&self, id: BookingId) -> EngineResult<Option<Booking>> {
        Ok(self.guard.bookings.get(&id).cloned())
    }

    fn set_booking_status(&mut self, id: BookingId, status: BookingStatus) -> EngineResult<()> {
        let booking =
            self.guard
                .bookings
                .get_mut(&id)
                .ok_or_else(|| EngineError::BookingNotFound {
                    booking_id: id.to_string(),
                })?;
        let previous = std::mem::replace(&mut booking.status, status);
        self.undo.push(Undo::BookingStatus { id, previous });
        Ok(())
    }

    fn bookings_for_passenger(&self, passenger: PassengerKey) -> EngineResult<Vec<Booking>> {
        Ok(self
            .guard
            .bookings
            .values()
            .filter(|b| b.passenger == passenger)
            .cloned()
            .collect())
    }

    fn commit(mut self) -> EngineResult<()> {
        self.undo.clear();
        Ok(())
    }
}
