// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users.

use crate::error::{AppError, Result};
use crate::models::identity::Identity;
use crate::models::progress::ProgressSnapshot;
use crate::models::stop::{Coordinates, Stop};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me))
        .route("/api/stops", get(get_stops))
        .route("/api/checkin", post(check_in))
        .route("/api/checkout", post(check_out))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
pub struct UserResponse {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub progress: ProgressSnapshot,
}

/// Get current user profile with tour progress.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> Result<Json<UserResponse>> {
    let progress = state.tour_service.snapshot(&identity);

    Ok(Json(UserResponse {
        user_id: identity.user_id,
        display_name: identity.display_name,
        email: identity.email,
        progress,
    }))
}

// ─── Itinerary ───────────────────────────────────────────────

/// Tour itinerary response.
#[derive(Serialize)]
pub struct StopsResponse {
    pub stops: Vec<Stop>,
    pub total: u32,
}

/// Get the full tour itinerary in route order.
async fn get_stops(State(state): State<Arc<AppState>>) -> Result<Json<StopsResponse>> {
    let stops = state.tour_service.itinerary().stops().to_vec();
    let total = stops.len() as u32;

    Ok(Json(StopsResponse { stops, total }))
}

// ─── Check-in / Check-out ────────────────────────────────────

#[derive(Deserialize)]
struct CheckinRequest {
    /// Stop being visited
    stop_id: Option<u32>,
    /// Device latitude, for location verification
    lat: Option<f64>,
    /// Device longitude, for location verification
    lng: Option<f64>,
}

#[derive(Serialize)]
pub struct CheckinResponse {
    pub message: String,
}

/// Start a visit at a stop, verifying location when supplied.
async fn check_in(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CheckinRequest>,
) -> Result<Json<CheckinResponse>> {
    let stop_id = parse_stop_id(body.stop_id)?;
    let location = parse_location(body.lat, body.lng)?;

    tracing::debug!(
        user_id = %identity.user_id,
        stop_id,
        located = location.is_some(),
        "Check-in requested"
    );

    let message = state.tour_service.check_in(&identity, stop_id, location)?;

    Ok(Json(CheckinResponse { message }))
}

#[derive(Deserialize)]
struct CheckoutRequest {
    stop_id: Option<u32>,
}

#[derive(Serialize)]
pub struct CheckoutResponse {
    pub message: String,
    pub seconds_spent: u64,
    pub points_earned: u64,
    pub total_score: u64,
    /// Next stop on the route; null once the tour is complete
    pub next_stop_id: Option<u32>,
}

/// Finish the in-progress visit and collect points.
async fn check_out(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>> {
    let stop_id = parse_stop_id(body.stop_id)?;

    tracing::debug!(
        user_id = %identity.user_id,
        stop_id,
        "Checkout requested"
    );

    let summary = state.tour_service.check_out(&identity, stop_id)?;

    Ok(Json(CheckoutResponse {
        message: format!(
            "You spent {} seconds and earned {} points!",
            summary.seconds_spent, summary.points_earned
        ),
        seconds_spent: summary.seconds_spent,
        points_earned: summary.points_earned,
        total_score: summary.total_score,
        next_stop_id: summary.next_stop_id,
    }))
}

// ─── Request Validation ──────────────────────────────────────

fn parse_stop_id(stop_id: Option<u32>) -> Result<u32> {
    match stop_id {
        Some(id) if id > 0 => Ok(id),
        _ => Err(AppError::InvalidInput("Invalid building ID".to_string())),
    }
}

fn parse_location(lat: Option<f64>, lng: Option<f64>) -> Result<Option<Coordinates>> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Ok(Some(Coordinates { lat, lng })),
        (None, None) => Ok(None),
        _ => Err(AppError::InvalidInput(
            "Both lat and lng are required for a located check-in".to_string(),
        )),
    }
}
