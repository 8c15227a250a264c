// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod google;
pub mod itinerary;
pub mod tour;

pub use google::{GoogleAuthService, GoogleUserInfo};
pub use itinerary::{ItineraryError, ItineraryService};
pub use tour::TourService;
