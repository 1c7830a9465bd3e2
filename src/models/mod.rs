// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod factors;
pub mod footprint;
pub mod user;

pub use activity::{Activity, ActivityType, Comparison, NewActivity};
pub use factors::{AverageEmissions, EmissionFactors};
pub use footprint::{FootprintAggregator, FootprintSummary, Period};
pub use user::User;
