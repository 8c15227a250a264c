//! Per-user tour progress state machine.
//!
//! Each user walks the route in order: awaiting check-in at the current
//! stop, checked in with a running dwell timer, then advanced to the next
//! stop at checkout. Points are earned at checkout from time spent.

use crate::models::identity::Identity;
use crate::models::stop::{Coordinates, Stop};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Maximum distance from a stop at which a located check-in is accepted.
pub const CHECKIN_RADIUS_METERS: f64 = 100.0;

/// Seconds of dwell time per point earned.
const SECONDS_PER_POINT: f64 = 5.0;

/// Mutable tour state for a single user.
///
/// Invariants:
/// - `dwell_start` is `Some` only while a visit to `current_stop_id` is in
///   progress.
/// - a stop id enters `visited` exactly once, at checkout, and
///   `current_stop_id` advances (or clears) in the same transition.
/// - `current_stop_id` increases by exactly 1 per completed stop and
///   becomes `None` after the final stop.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Next (or in-progress) stop on the route; `None` once the tour is done
    pub current_stop_id: Option<u32>,
    /// Accumulated points, never decreasing
    pub score: u64,
    /// When the in-progress visit started
    pub dwell_start: Option<DateTime<Utc>>,
    /// Completed stop ids in visit order
    pub visited: Vec<u32>,
    /// Display name captured when the record was created
    pub display_name: String,
    /// Email captured when the record was created
    pub contact_email: String,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutSummary {
    /// Whole seconds spent at the stop (fraction discarded)
    pub seconds_spent: u64,
    /// Points earned at this stop
    pub points_earned: u64,
    /// Cumulative score after this stop
    pub total_score: u64,
    /// Next stop on the route, `None` when the tour is complete
    pub next_stop_id: Option<u32>,
}

/// Read-only view of progress for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    pub current_stop_id: Option<u32>,
    pub score: u64,
    pub checked_in: bool,
    pub visited: Vec<u32>,
    pub created_at: String,
}

/// A rejected visit transition. All variants are user-facing and leave the
/// progress record untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VisitError {
    #[error("Please visit the correct building on the tour route.")]
    WrongStop {
        attempted: u32,
        expected: Option<u32>,
    },

    #[error("You have already visited this building.")]
    AlreadyVisited(u32),

    #[error(
        "You are {distance_meters:.0} m from this building; come within {limit_meters:.0} m to check in."
    )]
    TooFar {
        distance_meters: f64,
        limit_meters: f64,
    },

    #[error("You have not started a visit to this building. Check in first.")]
    NotCheckedIn,
}

impl Progress {
    /// Create a fresh record for a first-time visitor, awaiting check-in at
    /// stop 1.
    pub fn new(identity: &Identity, now: DateTime<Utc>) -> Self {
        Self {
            current_stop_id: Some(1),
            score: 0,
            dwell_start: None,
            visited: Vec::new(),
            display_name: identity.display_name.clone(),
            contact_email: identity.email.clone(),
            created_at: now,
        }
    }

    /// Start a visit at `stop`, optionally verifying the caller's location.
    ///
    /// Checking in again at the same stop before checkout resets the dwell
    /// timer; the route allows restarting a visit.
    pub fn check_in(
        &mut self,
        stop: &Stop,
        location: Option<Coordinates>,
        now: DateTime<Utc>,
    ) -> Result<(), VisitError> {
        if self.current_stop_id != Some(stop.id) {
            return Err(VisitError::WrongStop {
                attempted: stop.id,
                expected: self.current_stop_id,
            });
        }

        if self.visited.contains(&stop.id) {
            return Err(VisitError::AlreadyVisited(stop.id));
        }

        if let Some(location) = location {
            let distance_meters = stop.distance_from(location);
            if distance_meters > CHECKIN_RADIUS_METERS {
                return Err(VisitError::TooFar {
                    distance_meters,
                    limit_meters: CHECKIN_RADIUS_METERS,
                });
            }
        }

        self.dwell_start = Some(now);
        Ok(())
    }

    /// Finish the in-progress visit at `stop_id`, earn points, and advance
    /// the route.
    ///
    /// `route_len` is the total number of stops on the itinerary; checking
    /// out of the final stop completes the tour.
    pub fn check_out(
        &mut self,
        stop_id: u32,
        route_len: u32,
        now: DateTime<Utc>,
    ) -> Result<CheckoutSummary, VisitError> {
        if self.current_stop_id != Some(stop_id) {
            return Err(VisitError::WrongStop {
                attempted: stop_id,
                expected: self.current_stop_id,
            });
        }

        let started = self.dwell_start.ok_or(VisitError::NotCheckedIn)?;

        // Wall-clock dwell in fractional seconds; truncated, not rounded,
        // both for display and for scoring
        let dwell_seconds = (now.signed_duration_since(started).num_milliseconds().max(0)
            as f64)
            / 1000.0;
        let seconds_spent = dwell_seconds as u64;
        let points_earned = (dwell_seconds / SECONDS_PER_POINT) as u64;

        self.score += points_earned;
        self.visited.push(stop_id);
        self.dwell_start = None;
        self.current_stop_id = if stop_id < route_len {
            Some(stop_id + 1)
        } else {
            None
        };

        Ok(CheckoutSummary {
            seconds_spent,
            points_earned,
            total_score: self.score,
            next_stop_id: self.current_stop_id,
        })
    }

    /// Read-only view for API responses.
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            current_stop_id: self.current_stop_id,
            score: self.score,
            checked_in: self.dwell_start.is_some(),
            visited: self.visited.clone(),
            created_at: self.created_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}
