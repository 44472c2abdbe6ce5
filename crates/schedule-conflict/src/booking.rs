//! Bookings and conflict results.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::time_of_day::TimeRange;

/// The kind of resource a booking commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Crew,
    Equipment,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Crew => "crew",
            ResourceKind::Equipment => "equipment",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ResourceKind::Crew => "Crew",
            ResourceKind::Equipment => "Equipment",
        }
    }

    /// Serialized name of the conflicting-bookings field for this kind.
    pub fn conflicts_field(&self) -> &'static str {
        match self {
            ResourceKind::Crew => "conflictingAssignments",
            ResourceKind::Equipment => "conflictingReservations",
        }
    }

    fn booking_noun(&self, count: usize) -> &'static str {
        match (self, count) {
            (ResourceKind::Crew, 1) => "assignment",
            (ResourceKind::Crew, _) => "assignments",
            (ResourceKind::Equipment, 1) => "reservation",
            (ResourceKind::Equipment, _) => "reservations",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A crew assignment or equipment reservation as held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique booking id. Used to exclude a booking from its own update check.
    pub id: String,
    /// Tenant scope.
    pub company_id: String,
    /// Crew id or equipment id.
    pub resource_id: String,
    /// Stored as a UTC instant; its meaning is a local calendar date.
    pub scheduled_date: DateTime<Utc>,
    #[serde(default)]
    pub time_range: TimeRange,
}

/// Crew assignments and equipment reservations share one shape.
pub type CrewAssignment = Booking;
pub type EquipmentReservation = Booking;

/// An existing booking found to overlap the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConflict {
    pub booking: Booking,
    /// Local calendar date the booking was evaluated on.
    pub local_date: NaiveDate,
    pub overlap_minutes: i64,
}

/// Outcome of a conflict check. A conflict is a normal result, not an error.
///
/// Serializes `conflicts` as `conflictingAssignments` for crew checks and
/// `conflictingReservations` for equipment checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictResult {
    pub has_conflict: bool,
    pub conflict_type: ResourceKind,
    pub conflicts: Vec<BookingConflict>,
    /// Empty when there is no conflict.
    pub message: String,
    /// The timezone identifier the check ran in.
    pub timezone: String,
    /// True when an unknown timezone forced UTC-as-local conversion.
    pub timezone_degraded: bool,
}

impl ConflictResult {
    pub fn clear(kind: ResourceKind, timezone: impl Into<String>, degraded: bool) -> Self {
        Self {
            has_conflict: false,
            conflict_type: kind,
            conflicts: Vec::new(),
            message: String::new(),
            timezone: timezone.into(),
            timezone_degraded: degraded,
        }
    }

    /// Build a result from the overlapping bookings. `secondary` is the next
    /// local date when the candidate crosses midnight.
    pub fn from_conflicts(
        kind: ResourceKind,
        conflicts: Vec<BookingConflict>,
        primary: NaiveDate,
        secondary: Option<NaiveDate>,
        timezone: impl Into<String>,
        degraded: bool,
    ) -> Self {
        if conflicts.is_empty() {
            return Self::clear(kind, timezone, degraded);
        }

        let when = match secondary {
            Some(next) => format!("{primary} to {next}"),
            None => primary.to_string(),
        };
        let message = format!(
            "{} already has {} conflicting {} on {}",
            kind.label(),
            conflicts.len(),
            kind.booking_noun(conflicts.len()),
            when
        );

        Self {
            has_conflict: true,
            conflict_type: kind,
            conflicts,
            message,
            timezone: timezone.into(),
            timezone_degraded: degraded,
        }
    }

    /// The conflicting bookings without the per-conflict detail.
    pub fn conflicting_bookings(&self) -> Vec<&Booking> {
        self.conflicts.iter().map(|c| &c.booking).collect()
    }

    /// Conflicts of a crew check. Empty for equipment checks.
    pub fn conflicting_assignments(&self) -> &[BookingConflict] {
        self.conflicts_of(ResourceKind::Crew)
    }

    /// Conflicts of an equipment check. Empty for crew checks.
    pub fn conflicting_reservations(&self) -> &[BookingConflict] {
        self.conflicts_of(ResourceKind::Equipment)
    }

    fn conflicts_of(&self, kind: ResourceKind) -> &[BookingConflict] {
        if self.conflict_type == kind {
            &self.conflicts
        } else {
            &[]
        }
    }
}

impl Serialize for ConflictResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ConflictResult", 6)?;
        state.serialize_field("hasConflict", &self.has_conflict)?;
        state.serialize_field("conflictType", &self.conflict_type)?;
        state.serialize_field(self.conflict_type.conflicts_field(), &self.conflicts)?;
        state.serialize_field("message", &self.message)?;
        state.serialize_field("timezone", &self.timezone)?;
        state.serialize_field("timezoneDegraded", &self.timezone_degraded)?;
        state.end()
    }
}

/// Inclusive UTC range for availability queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }
}
