//! Storage collaborator interface.
//!
//! Bookings are owned by an external store. This crate only reads them through
//! [`ScheduleStore`], once per local-date bucket, and never caches results.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::booking::{Booking, ResourceKind};
use crate::error::StoreResult;

/// Read-only queries consumed by the conflict service.
///
/// Range queries are inclusive on both ends: a booking matches when
/// `start <= scheduled_date <= end`.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so bucket queries can run concurrently.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Crew assignments for `crew_id` within a UTC range, scoped to a company.
    async fn crew_assignments(
        &self,
        company_id: &str,
        crew_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Booking>>;

    /// Equipment reservations for `equipment_id` within a UTC range, scoped to a company.
    async fn equipment_reservations(
        &self,
        company_id: &str,
        equipment_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Booking>>;

    /// The company's configured IANA timezone, if any.
    async fn company_timezone(&self, company_id: &str) -> StoreResult<Option<String>>;
}

#[async_trait]
impl<S: ScheduleStore + ?Sized> ScheduleStore for Arc<S> {
    async fn crew_assignments(
        &self,
        company_id: &str,
        crew_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Booking>> {
        (**self).crew_assignments(company_id, crew_id, start, end).await
    }

    async fn equipment_reservations(
        &self,
        company_id: &str,
        equipment_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Booking>> {
        (**self)
            .equipment_reservations(company_id, equipment_id, start, end)
            .await
    }

    async fn company_timezone(&self, company_id: &str) -> StoreResult<Option<String>> {
        (**self).company_timezone(company_id).await
    }
}

/// Fetch bookings of either kind through the matching store query.
pub(crate) async fn bookings_for_resource<S: ScheduleStore + ?Sized>(
    store: &S,
    kind: ResourceKind,
    company_id: &str,
    resource_id: &str,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> StoreResult<Vec<Booking>> {
    match kind {
        ResourceKind::Crew => store.crew_assignments(company_id, resource_id, start, end).await,
        ResourceKind::Equipment => {
            store
                .equipment_reservations(company_id, resource_id, start, end)
                .await
        }
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    crew: Vec<Booking>,
    equipment: Vec<Booking>,
    timezones: HashMap<String, String>,
}

/// In-memory [`ScheduleStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, kind: ResourceKind, booking: Booking) {
        let mut state = self.state.write();
        match kind {
            ResourceKind::Crew => state.crew.push(booking),
            ResourceKind::Equipment => state.equipment.push(booking),
        }
    }

    /// Remove a booking by id. Returns whether one was removed.
    pub fn remove(&self, kind: ResourceKind, booking_id: &str) -> bool {
        let mut state = self.state.write();
        let bookings = match kind {
            ResourceKind::Crew => &mut state.crew,
            ResourceKind::Equipment => &mut state.equipment,
        };
        let before = bookings.len();
        bookings.retain(|b| b.id != booking_id);
        bookings.len() != before
    }

    pub fn set_company_timezone(&self, company_id: impl Into<String>, timezone: impl Into<String>) {
        self.state
            .write()
            .timezones
            .insert(company_id.into(), timezone.into());
    }

    pub fn len(&self, kind: ResourceKind) -> usize {
        let state = self.state.read();
        match kind {
            ResourceKind::Crew => state.crew.len(),
            ResourceKind::Equipment => state.equipment.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        let state = self.state.read();
        state.crew.is_empty() && state.equipment.is_empty()
    }

    fn query(
        bookings: &[Booking],
        company_id: &str,
        resource_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<Booking> {
        bookings
            .iter()
            .filter(|b| {
                b.company_id == company_id
                    && b.resource_id == resource_id
                    && start <= b.scheduled_date
                    && b.scheduled_date <= end
            })
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ScheduleStore for MemoryStore {
    async fn crew_assignments(
        &self,
        company_id: &str,
        crew_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Booking>> {
        let state = self.state.read();
        Ok(Self::query(&state.crew, company_id, crew_id, start, end))
    }

    async fn equipment_reservations(
        &self,
        company_id: &str,
        equipment_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StoreResult<Vec<Booking>> {
        let state = self.state.read();
        Ok(Self::query(&state.equipment, company_id, equipment_id, start, end))
    }

    async fn company_timezone(&self, company_id: &str) -> StoreResult<Option<String>> {
        Ok(self.state.read().timezones.get(company_id).cloned())
    }
}
