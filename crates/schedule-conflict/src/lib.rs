//! # schedule-conflict
//!
//! Timezone-aware double-booking detection for crew assignments and equipment
//! reservations.
//!
//! Given a candidate booking (resource, local date, wall-clock time range) the
//! service decides whether it overlaps any booking already held by the store.
//! Time ranges may cross midnight, and bookings are stored as UTC instants
//! that mean a local calendar date in the company's timezone. All comparisons
//! happen on a single absolute minute axis.
//!
//! ## Modules
//!
//! - [`time_of_day`] — `"HH:MM"` parsing, midnight crossing, 12-hour display
//! - [`interval`] — (local date, time range) → absolute minute interval
//! - [`local_date`] — UTC instant ↔ local calendar date, day bounds, candidate dates
//! - [`conflict`] — Overlap detection between a candidate and existing bookings
//! - [`availability`] — Bookings of a resource over a date range
//! - [`service`] — [`ConflictService`], the crew and equipment entry points
//! - [`store`] — The storage collaborator trait and an in-memory store
//! - [`config`] — Default timezone and timezone policy
//! - [`error`] — Error types

pub mod availability;
pub mod booking;
pub mod config;
pub mod conflict;
pub mod error;
pub mod interval;
pub mod local_date;
pub mod service;
pub mod store;
pub mod time_of_day;

pub use booking::{
    Booking, BookingConflict, ConflictResult, CrewAssignment, DateRange, EquipmentReservation,
    ResourceKind,
};
pub use config::{ConflictConfig, TimezonePolicy};
pub use conflict::find_conflicts;
pub use error::{ConflictError, StoreError};
pub use interval::AbsoluteInterval;
pub use local_date::{dates_for_candidate, day_bounds_utc, local_date_of, ZoneContext};
pub use service::{ConflictCheck, ConflictService};
pub use store::{MemoryStore, ScheduleStore};
pub use time_of_day::{format_for_display, format_time_for_display, parse_time_of_day, TimeRange};
