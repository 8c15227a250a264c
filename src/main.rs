// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Heritage-Tour API Server
//!
//! Serves the campus heritage tour: users sign in with Google, follow the
//! fixed building route, and earn points for time spent at each stop.

use heritage_tour::{
    config::Config,
    services::{GoogleAuthService, ItineraryService, TourService},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Heritage-Tour API");

    // Load the building itinerary, seeding the placeholder route if the
    // file does not exist yet
    tracing::info!(path = %config.buildings_path, "Loading tour itinerary");
    let itinerary = ItineraryService::load_or_seed(&config.buildings_path)
        .expect("Failed to load tour itinerary");
    tracing::info!(count = itinerary.len(), "Tour itinerary loaded");

    // Per-user tour progress store
    let tour_service = TourService::new(itinerary);

    // Google OAuth client
    let google_auth = GoogleAuthService::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        tour_service,
        google_auth,
    });

    // Build router
    let app = heritage_tour::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("heritage_tour=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
