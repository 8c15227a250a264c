// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::models::progress::VisitError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Invalid request: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Visit(#[from] VisitError),

    #[error("Google API error: {0}")]
    GoogleApi(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    /// Measured distance, present only for too-far check-in rejections
    #[serde(skip_serializing_if = "Option::is_none")]
    distance_meters: Option<f64>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut distance_meters = None;

        let (status, error, details) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, "invalid_token", None),
            AppError::InvalidInput(msg) => {
                (StatusCode::BAD_REQUEST, "invalid_input", Some(msg.clone()))
            }
            AppError::Visit(visit) => {
                let code = match visit {
                    VisitError::WrongStop { .. } => "wrong_stop",
                    VisitError::AlreadyVisited(_) => "already_visited",
                    VisitError::TooFar {
                        distance_meters: measured,
                        ..
                    } => {
                        distance_meters = Some(*measured);
                        "too_far"
                    }
                    VisitError::NotCheckedIn => "not_checked_in",
                };
                (StatusCode::BAD_REQUEST, code, Some(visit.to_string()))
            }
            AppError::GoogleApi(msg) => {
                (StatusCode::BAD_GATEWAY, "google_error", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
            distance_meters,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
