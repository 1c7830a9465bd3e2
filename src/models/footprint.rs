// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Footprint aggregation over a set of activities.
//!
//! Totals are computed on read from the activities in the requested period
//! and compared against the average total footprint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityType, AverageEmissions, Comparison};

/// Inclusive date range of a footprint query. `None` bounds are open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Aggregated footprint for a user over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FootprintSummary {
    pub user_id: String,
    pub period: Period,
    /// Sum of all activity emissions (kg CO2)
    pub total_emission: f64,
    /// Emission per category; every category is present
    pub by_category: BTreeMap<ActivityType, f64>,
    pub comparison: Comparison,
    /// Number of activities aggregated
    pub activity_count: usize,
}

/// Running totals per category.
#[derive(Debug, Clone, PartialEq)]
pub struct FootprintAggregator {
    total_emission: f64,
    by_category: BTreeMap<ActivityType, f64>,
    activity_count: usize,
}

impl Default for FootprintAggregator {
    fn default() -> Self {
        Self {
            total_emission: 0.0,
            by_category: ActivityType::ALL.into_iter().map(|t| (t, 0.0)).collect(),
            activity_count: 0,
        }
    }
}

impl FootprintAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an activity's emission to the totals.
    ///
    /// Activities whose emission was never computed count as zero.
    pub fn add_activity(&mut self, activity: &Activity) {
        let emission = activity.carbon_emission.unwrap_or(0.0);

        self.total_emission += emission;
        *self
            .by_category
            .entry(activity.activity_type)
            .or_insert(0.0) += emission;
        self.activity_count += 1;
    }

    pub fn total_emission(&self) -> f64 {
        self.total_emission
    }

    pub fn by_category(&self) -> &BTreeMap<ActivityType, f64> {
        &self.by_category
    }

    /// Build the summary, comparing the total against `averages.total`.
    ///
    /// Fails if any running total or the comparison has overflowed.
    pub fn finish(
        self,
        user_id: &str,
        period: Period,
        averages: &AverageEmissions,
    ) -> Result<FootprintSummary> {
        let average_total = averages.total.ok_or_else(|| {
            AppError::Precondition("No average total emission available".to_string())
        })?;

        let comparison = Comparison::against(self.total_emission, average_total);
        let all_finite = self.total_emission.is_finite()
            && comparison.difference.is_finite()
            && self.by_category.values().all(|e| e.is_finite());
        if !all_finite {
            return Err(AppError::Precondition(
                "Total emission is not a finite number".to_string(),
            ));
        }

        Ok(FootprintSummary {
            user_id: user_id.to_string(),
            period,
            total_emission: self.total_emission,
            comparison,
            by_category: self.by_category,
            activity_count: self.activity_count,
        })
    }

    /// Aggregate `activities` and compare against `averages` in one step.
    pub fn summarize(
        user_id: &str,
        period: Period,
        activities: &[Activity],
        averages: &AverageEmissions,
    ) -> Result<FootprintSummary> {
        let mut aggregator = Self::new();
        for activity in activities {
            aggregator.add_activity(activity);
        }
        aggregator.finish(user_id, period, averages)
    }
}
