// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod identity;
pub mod progress;
pub mod stop;

pub use identity::Identity;
pub use progress::{CheckoutSummary, Progress, VisitError};
pub use stop::{Coordinates, Stop};
