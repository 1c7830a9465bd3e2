// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity entity: validation, emission calculation and comparison.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, Result};
use crate::models::{AverageEmissions, EmissionFactors};
use crate::time_utils::{parse_utc_rfc3339, truncate_to_millis};

/// Category of an emitting activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Transportation,
    Energy,
    Food,
    Consumption,
}

impl ActivityType {
    /// Every category, in reporting order.
    pub const ALL: [ActivityType; 4] = [
        ActivityType::Transportation,
        ActivityType::Energy,
        ActivityType::Food,
        ActivityType::Consumption,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Transportation => "transportation",
            ActivityType::Energy => "energy",
            ActivityType::Food => "food",
            ActivityType::Consumption => "consumption",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        ActivityType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| AppError::Validation(format!("unknown activity type: {}", s)))
    }
}

/// Raw creation payload as received from a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewActivity {
    pub user_id: String,
    #[serde(rename = "type")]
    pub activity_type: String,
    pub value: f64,
    pub unit: String,
    /// RFC 3339 timestamp; defaults to the creation time when absent
    #[serde(default)]
    pub date: Option<String>,
}

impl NewActivity {
    /// Parse into an unsaved [`Activity`], using `now` when no date was given.
    ///
    /// Unknown types and malformed dates are rejected here, since an
    /// `Activity` cannot represent them. The date is kept to millisecond
    /// precision, the precision stores hold it at.
    pub fn into_activity(self, now: DateTime<Utc>) -> Result<Activity> {
        let activity_type: ActivityType = self.activity_type.parse()?;
        let date = match self.date.as_deref() {
            Some(raw) => parse_utc_rfc3339(raw)
                .map_err(|e| AppError::Validation(format!("invalid date {:?}: {}", raw, e)))?,
            None => now,
        };
        let date = truncate_to_millis(date);

        Ok(Activity::new(
            self.user_id,
            activity_type,
            self.value,
            self.unit,
            date,
        ))
    }
}

/// A single emitting activity recorded for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Assigned by the store on save
    pub id: Option<String>,
    pub user_id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Measured amount, in `unit`
    pub value: f64,
    /// Unit symbol, e.g. "km" or "kwh"
    pub unit: String,
    pub date: DateTime<Utc>,
    /// kg CO2, set by [`Activity::calculate_emission`]
    pub carbon_emission: Option<f64>,
}

/// Emission compared against an average baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub difference: f64,
    /// `None` when the baseline is zero or the ratio is not representable
    pub percentage_diff: Option<f64>,
    pub is_better_than_average: bool,
}

impl Comparison {
    pub fn against(emission: f64, average: f64) -> Self {
        let difference = emission - average;
        let percentage_diff = if average == 0.0 {
            None
        } else {
            Some(difference / average * 100.0).filter(|p| p.is_finite())
        };

        Self {
            difference,
            percentage_diff,
            is_better_than_average: difference < 0.0,
        }
    }
}

impl Activity {
    pub fn new(
        user_id: impl Into<String>,
        activity_type: ActivityType,
        value: f64,
        unit: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            user_id: user_id.into(),
            activity_type,
            value,
            unit: unit.into(),
            date,
            carbon_emission: None,
        }
    }

    /// Check the invariants an activity must hold before it is computed or saved.
    pub fn is_valid(&self) -> bool {
        self.validation_error().is_none()
    }

    /// First violated invariant, if any.
    pub fn validation_error(&self) -> Option<&'static str> {
        if self.user_id.trim().is_empty() {
            Some("user id is required")
        } else if !self.value.is_finite() || self.value <= 0.0 {
            Some("value must be a positive number")
        } else if self.unit.trim().is_empty() {
            Some("unit is required")
        } else if self.date.timestamp_nanos_opt().is_none() {
            Some("date is out of range")
        } else {
            None
        }
    }

    /// Compute and store `value * factor[type][unit]`.
    pub fn calculate_emission(&mut self, factors: &EmissionFactors) -> Result<f64> {
        let unit_factors = factors.for_type(self.activity_type).ok_or_else(|| {
            AppError::NotFound(format!(
                "No emission factors found for activity type: {}",
                self.activity_type
            ))
        })?;

        let factor = unit_factors.get(&self.unit).ok_or_else(|| {
            AppError::NotFound(format!(
                "No emission factor found for unit {} in activity type {}",
                self.unit, self.activity_type
            ))
        })?;

        let emission = self.value * factor;
        if !emission.is_finite() {
            return Err(AppError::Validation(format!(
                "emission for {} {} is not a finite number",
                self.value, self.unit
            )));
        }
        self.carbon_emission = Some(emission);
        Ok(emission)
    }

    /// Compare the computed emission with the average for this type.
    pub fn compare_to_average(&self, averages: &AverageEmissions) -> Result<Comparison> {
        let emission = self.carbon_emission.ok_or_else(|| {
            AppError::Precondition("Carbon emission has not been calculated yet".to_string())
        })?;

        let average = averages.for_type(self.activity_type).ok_or_else(|| {
            AppError::Precondition(format!(
                "No average emission data for activity type: {}",
                self.activity_type
            ))
        })?;

        Ok(Comparison::against(emission, average))
    }
}
