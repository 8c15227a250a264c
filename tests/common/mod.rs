// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use heritage_tour::config::Config;
use heritage_tour::models::Stop;
use heritage_tour::routes::create_router;
use heritage_tour::services::{GoogleAuthService, ItineraryService, TourService};
use heritage_tour::AppState;
use std::sync::Arc;

/// Three-stop campus route used by the flow tests.
///
/// Coordinates follow the placeholder pattern so tests can derive nearby
/// and faraway locations from them.
#[allow(dead_code)]
pub fn three_stop_itinerary() -> ItineraryService {
    let stops = vec![
        Stop {
            id: 1,
            name: "Founders Hall".to_string(),
            course: "Rhetoric and Oratory".to_string(),
            lat: 34.0532,
            lng: -118.2427,
            info: "The oldest building on campus.".to_string(),
        },
        Stop {
            id: 2,
            name: "Old Mechanics Hall".to_string(),
            course: "Steam Engineering".to_string(),
            lat: 34.0542,
            lng: -118.2417,
            info: "Home of the first engineering course.".to_string(),
        },
        Stop {
            id: 3,
            name: "The Observatory".to_string(),
            course: "Practical Astronomy".to_string(),
            lat: 34.0552,
            lng: -118.2407,
            info: "Still houses the original refractor.".to_string(),
        },
    ];

    ItineraryService::from_stops(stops).expect("fixture route is valid")
}

/// Create a test app over the three-stop route.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(three_stop_itinerary())
}

/// Create a test app over a custom itinerary.
#[allow(dead_code)]
pub fn create_test_app_with(itinerary: ItineraryService) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let tour_service = TourService::new(itinerary);
    let google_auth = GoogleAuthService::new(
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
    );

    let state = Arc::new(AppState {
        config,
        tour_service,
        google_auth,
    });

    (create_router(state.clone()), state)
}
