// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Footprint tracker: carbon emissions of user activities
//!
//! This crate computes per-activity carbon emissions from configurable
//! emission factors and aggregates a user's footprint over a date range,
//! compared against an average baseline.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod time_utils;
