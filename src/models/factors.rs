// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Emission factor and average emission reference tables.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::ActivityType;

/// kg CO2 per unit, keyed by activity type and then by unit symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmissionFactors {
    factors: HashMap<ActivityType, HashMap<String, f64>>,
}

impl EmissionFactors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly for tests and fixtures.
    pub fn with_factor(mut self, activity_type: ActivityType, unit: &str, factor: f64) -> Self {
        self.insert(activity_type, unit, factor);
        self
    }

    pub fn insert(&mut self, activity_type: ActivityType, unit: &str, factor: f64) {
        self.factors
            .entry(activity_type)
            .or_default()
            .insert(unit.to_string(), factor);
    }

    /// All unit factors registered for a type.
    pub fn for_type(&self, activity_type: ActivityType) -> Option<&HashMap<String, f64>> {
        self.factors.get(&activity_type)
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

/// Average emissions per activity type plus an aggregate total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageEmissions {
    /// Average kg CO2 per activity type
    #[serde(default)]
    pub by_type: HashMap<ActivityType, f64>,
    /// Average total kg CO2, compared against a whole footprint
    #[serde(default)]
    pub total: Option<f64>,
}

impl AverageEmissions {
    pub fn for_type(&self, activity_type: ActivityType) -> Option<f64> {
        self.by_type.get(&activity_type).copied()
    }
}
