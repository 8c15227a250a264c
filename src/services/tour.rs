// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user tour progress store and check-in/check-out transitions.

use crate::models::identity::Identity;
use crate::models::progress::{CheckoutSummary, Progress, ProgressSnapshot, VisitError};
use crate::models::stop::Coordinates;
use crate::services::itinerary::ItineraryService;
use chrono::Utc;
use dashmap::DashMap;

/// Service owning the itinerary and every user's tour progress.
///
/// Progress lives in memory for the lifetime of the process. All mutations
/// go through `DashMap::entry`, which holds the per-key lock for the whole
/// transition: check-in and check-out against the same user are mutually
/// exclusive, while unrelated users proceed in parallel.
pub struct TourService {
    itinerary: ItineraryService,
    progress: DashMap<String, Progress>,
}

impl TourService {
    pub fn new(itinerary: ItineraryService) -> Self {
        Self {
            itinerary,
            progress: DashMap::new(),
        }
    }

    /// The route this service is serving.
    pub fn itinerary(&self) -> &ItineraryService {
        &self.itinerary
    }

    /// Start a visit at `stop_id` for the caller, verifying location when
    /// one is supplied.
    ///
    /// Returns the confirmation message shown to the visitor.
    pub fn check_in(
        &self,
        identity: &Identity,
        stop_id: u32,
        location: Option<Coordinates>,
    ) -> Result<String, VisitError> {
        let now = Utc::now();
        let mut entry = self
            .progress
            .entry(identity.user_id.clone())
            .or_insert_with(|| new_progress(identity));
        let progress = entry.value_mut();

        // An id outside the route can never be the current stop
        let Some(stop) = self.itinerary.get(stop_id) else {
            return Err(VisitError::WrongStop {
                attempted: stop_id,
                expected: progress.current_stop_id,
            });
        };

        progress.check_in(stop, location, now)?;

        tracing::info!(
            user_id = %identity.user_id,
            stop_id,
            located = location.is_some(),
            "Checked in"
        );

        Ok(format!("Welcome to {}! Your timer has started.", stop.name))
    }

    /// Finish the caller's in-progress visit at `stop_id`.
    pub fn check_out(
        &self,
        identity: &Identity,
        stop_id: u32,
    ) -> Result<CheckoutSummary, VisitError> {
        let now = Utc::now();
        let route_len = self.itinerary.len() as u32;

        let mut entry = self
            .progress
            .entry(identity.user_id.clone())
            .or_insert_with(|| new_progress(identity));
        let summary = entry.value_mut().check_out(stop_id, route_len, now)?;

        tracing::info!(
            user_id = %identity.user_id,
            stop_id,
            seconds_spent = summary.seconds_spent,
            points_earned = summary.points_earned,
            total_score = summary.total_score,
            "Checked out"
        );

        Ok(summary)
    }

    /// Read-only view of the caller's progress, creating the record on
    /// first access.
    pub fn snapshot(&self, identity: &Identity) -> ProgressSnapshot {
        self.progress
            .entry(identity.user_id.clone())
            .or_insert_with(|| new_progress(identity))
            .snapshot()
    }
}

/// Factory for first-time visitors; runs under the per-key entry lock.
fn new_progress(identity: &Identity) -> Progress {
    tracing::debug!(
        user_id = %identity.user_id,
        display_name = %identity.display_name,
        "Creating tour progress record"
    );
    Progress::new(identity, Utc::now())
}
