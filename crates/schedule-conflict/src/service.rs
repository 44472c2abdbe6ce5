//! The conflict detection service.
//!
//! A check resolves the company timezone, works out which local dates the
//! candidate can touch (its own, the previous, and the next when it crosses
//! midnight), fetches the resource's bookings for those dates concurrently,
//! and compares each against the candidate on the absolute minute axis.
//!
//! Nothing is cached and nothing is written. Two concurrent checks can both
//! report no conflict; making check-then-reserve atomic is the store's job.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use tracing::debug;

use crate::availability::resource_availability;
use crate::booking::{Booking, ConflictResult, DateRange, ResourceKind};
use crate::config::{ConflictConfig, TimezonePolicy};
use crate::conflict::find_conflicts;
use crate::error::Result;
use crate::interval::AbsoluteInterval;
use crate::local_date::ZoneContext;
use crate::store::{bookings_for_resource, ScheduleStore};
use crate::time_of_day::TimeRange;

/// A candidate booking to check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictCheck {
    pub company_id: String,
    pub resource_id: String,
    /// UTC instant whose local date is the candidate's calendar date.
    pub scheduled_date: DateTime<Utc>,
    pub time_range: TimeRange,
    /// Booking to ignore, normally the one being updated.
    pub exclude_booking_id: Option<String>,
    /// Overrides the company's configured timezone.
    pub timezone: Option<String>,
}

impl ConflictCheck {
    pub fn new(
        company_id: impl Into<String>,
        resource_id: impl Into<String>,
        scheduled_date: DateTime<Utc>,
        time_range: TimeRange,
    ) -> Self {
        Self {
            company_id: company_id.into(),
            resource_id: resource_id.into(),
            scheduled_date,
            time_range,
            exclude_booking_id: None,
            timezone: None,
        }
    }

    pub fn excluding(mut self, booking_id: impl Into<String>) -> Self {
        self.exclude_booking_id = Some(booking_id.into());
        self
    }

    pub fn in_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }
}

pub struct ConflictService<S> {
    store: S,
    config: ConflictConfig,
}

impl<S: ScheduleStore> ConflictService<S> {
    /// # Errors
    ///
    /// Returns [`ConflictError::Config`](crate::error::ConflictError::Config)
    /// if the configured default timezone is invalid.
    pub fn new(store: S, config: ConflictConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { store, config })
    }

    /// A service with [`ConflictConfig::default`].
    pub fn with_default_config(store: S) -> Self {
        Self {
            store,
            config: ConflictConfig::default(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &ConflictConfig {
        &self.config
    }

    /// Resolve the zone for a check: `explicit` if given, else the company's
    /// configured zone, else the configured default.
    pub async fn resolve_timezone(
        &self,
        company_id: &str,
        explicit: Option<&str>,
    ) -> Result<ZoneContext> {
        let name = match explicit.map(str::trim).filter(|tz| !tz.is_empty()) {
            Some(tz) => tz.to_string(),
            None => self
                .store
                .company_timezone(company_id)
                .await?
                .map(|tz| tz.trim().to_string())
                .filter(|tz| !tz.is_empty())
                .unwrap_or_else(|| self.config.default_timezone.clone()),
        };

        match self.config.timezone_policy {
            TimezonePolicy::Fallback => Ok(ZoneContext::resolve(&name)),
            TimezonePolicy::Strict => ZoneContext::strict(&name),
        }
    }

    /// Check a candidate booking of `kind` against existing bookings.
    ///
    /// # Errors
    ///
    /// Store failures propagate unchanged. Under
    /// [`TimezonePolicy::Strict`] an unknown timezone is an error.
    pub async fn check_conflict(
        &self,
        kind: ResourceKind,
        check: &ConflictCheck,
    ) -> Result<ConflictResult> {
        let zone = self
            .resolve_timezone(&check.company_id, check.timezone.as_deref())
            .await?;
        self.check_in_zone(kind, check, zone).await
    }

    async fn check_in_zone(
        &self,
        kind: ResourceKind,
        check: &ConflictCheck,
        zone: ZoneContext,
    ) -> Result<ConflictResult> {
        let dates = zone.dates_for_candidate(check.scheduled_date, &check.time_range);
        let buckets = dates.query_dates();

        let fetches = buckets.iter().map(|date| {
            let bounds = zone.day_bounds(*date);
            bookings_for_resource(
                &self.store,
                kind,
                &check.company_id,
                &check.resource_id,
                bounds.start_of_day_utc,
                bounds.end_of_day_utc,
            )
        });
        let fetched = try_join_all(fetches).await?;

        let mut seen = HashSet::new();
        let existing: Vec<Booking> = fetched
            .into_iter()
            .flatten()
            .filter(|b| check.exclude_booking_id.as_deref() != Some(b.id.as_str()))
            .filter(|b| seen.insert(b.id.clone()))
            .collect();

        debug!(
            kind = kind.as_str(),
            resource_id = %check.resource_id,
            timezone = %zone.name,
            dates = ?buckets,
            existing = existing.len(),
            "fetched bookings for conflict check"
        );

        let candidate = AbsoluteInterval::from_local_date(dates.primary, &check.time_range);
        let conflicts = find_conflicts(&candidate, &existing, &zone);

        debug!(
            kind = kind.as_str(),
            resource_id = %check.resource_id,
            conflicts = conflicts.len(),
            "conflict check complete"
        );

        Ok(ConflictResult::from_conflicts(
            kind,
            conflicts,
            dates.primary,
            dates.secondary,
            zone.name,
            zone.degraded,
        ))
    }

    pub async fn check_crew_conflict(&self, check: &ConflictCheck) -> Result<ConflictResult> {
        self.check_conflict(ResourceKind::Crew, check).await
    }

    pub async fn check_equipment_conflict(&self, check: &ConflictCheck) -> Result<ConflictResult> {
        self.check_conflict(ResourceKind::Equipment, check).await
    }

    /// Like [`check_crew_conflict`](Self::check_crew_conflict), but always in
    /// the company's configured timezone, ignoring `check.timezone`.
    pub async fn check_crew_conflict_in_company_zone(
        &self,
        check: &ConflictCheck,
    ) -> Result<ConflictResult> {
        self.check_in_company_zone(ResourceKind::Crew, check).await
    }

    /// Like [`check_equipment_conflict`](Self::check_equipment_conflict), but
    /// always in the company's configured timezone, ignoring `check.timezone`.
    pub async fn check_equipment_conflict_in_company_zone(
        &self,
        check: &ConflictCheck,
    ) -> Result<ConflictResult> {
        self.check_in_company_zone(ResourceKind::Equipment, check).await
    }

    async fn check_in_company_zone(
        &self,
        kind: ResourceKind,
        check: &ConflictCheck,
    ) -> Result<ConflictResult> {
        let zone = self.resolve_timezone(&check.company_id, None).await?;
        self.check_in_zone(kind, check, zone).await
    }

    /// Every crew assignment for `crew_id` within `range`.
    pub async fn crew_availability(
        &self,
        company_id: &str,
        crew_id: &str,
        range: DateRange,
    ) -> Result<Vec<Booking>> {
        resource_availability(&self.store, ResourceKind::Crew, company_id, crew_id, range).await
    }

    /// Every equipment reservation for `equipment_id` within `range`.
    pub async fn equipment_availability(
        &self,
        company_id: &str,
        equipment_id: &str,
        range: DateRange,
    ) -> Result<Vec<Booking>> {
        resource_availability(
            &self.store,
            ResourceKind::Equipment,
            company_id,
            equipment_id,
            range,
        )
        .await
    }
}
