// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Tour stop model.

use crate::geo;
use serde::{Deserialize, Serialize};

/// A single building on the fixed tour route.
///
/// Stop ids are 1-based and contiguous across the itinerary; ordering by
/// id defines the route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Stop id (positive, 1-based)
    pub id: u32,
    /// Building name (e.g., "Old Mechanics Hall")
    pub name: String,
    /// Course or topic historically taught there
    pub course: String,
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
    /// Descriptive text shown to visitors
    pub info: String,
}

impl Stop {
    /// Great-circle distance in meters from a supplied location to this stop.
    pub fn distance_from(&self, location: Coordinates) -> f64 {
        geo::haversine_distance(location.lat, location.lng, self.lat, self.lng)
    }
}

/// A geographic coordinate pair supplied with a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_from_own_coordinates_is_zero() {
        let stop = Stop {
            id: 1,
            name: "Founders Hall".to_string(),
            course: "Rhetoric".to_string(),
            lat: 34.0522,
            lng: -118.2437,
            info: "The oldest building on campus.".to_string(),
        };

        let d = stop.distance_from(Coordinates {
            lat: 34.0522,
            lng: -118.2437,
        });
        assert_eq!(d, 0.0);
    }
}
