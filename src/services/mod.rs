// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activity;
pub mod audit;
pub mod factors;

pub use activity::ActivityService;
pub use audit::{AuditSink, TracingAuditSink};
pub use factors::{EmissionFactorLookup, FactorTable};
