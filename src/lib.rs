// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Heritage-Tour: Walk the campus heritage route, one building at a time
//!
//! This crate provides the backend API for the campus heritage tour:
//! Google sign-in, ordered check-ins at each building, and a dwell-time
//! score accumulated along the way.

pub mod config;
pub mod error;
pub mod geo;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{GoogleAuthService, TourService};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub tour_service: TourService,
    pub google_auth: GoogleAuthService,
}
