// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Emission factor loading and lookup.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{AppError, Result};
use crate::models::{ActivityType, AverageEmissions, EmissionFactors};

/// Supplies emission factors and average emissions.
#[async_trait::async_trait]
pub trait EmissionFactorLookup: Send + Sync {
    async fn emission_factors(&self) -> Result<EmissionFactors>;
    async fn average_emissions(&self) -> Result<AverageEmissions>;
}

/// On-disk layout of a factor table.
#[derive(Deserialize)]
struct FactorFile {
    factors: EmissionFactors,
    #[serde(default)]
    averages: AverageEmissions,
}

/// Factor and average tables loaded once and served from memory.
#[derive(Debug, Clone, Default)]
pub struct FactorTable {
    factors: EmissionFactors,
    averages: AverageEmissions,
}

impl FactorTable {
    pub fn new(factors: EmissionFactors, averages: AverageEmissions) -> Self {
        Self { factors, averages }
    }

    /// Load factors from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json_data = fs::read_to_string(path.as_ref()).map_err(|e| {
            AppError::Collaborator(format!(
                "Failed to read emission factors from {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::load_from_json(&json_data)
    }

    /// Load factors from a JSON string.
    pub fn load_from_json(json_data: &str) -> Result<Self> {
        let file: FactorFile = serde_json::from_str(json_data).map_err(|e| {
            AppError::Collaborator(format!("Failed to parse emission factors: {}", e))
        })?;

        if file.factors.is_empty() {
            return Err(AppError::Collaborator(
                "Emission factor table is empty".to_string(),
            ));
        }

        if let Some((activity_type, unit, factor)) = first_negative(&file.factors) {
            return Err(AppError::Collaborator(format!(
                "Negative emission factor {} for unit {} in activity type {}",
                factor, unit, activity_type
            )));
        }

        tracing::info!(
            average_total = ?file.averages.total,
            "Loaded emission factors"
        );

        Ok(Self {
            factors: file.factors,
            averages: file.averages,
        })
    }

    pub fn factors(&self) -> &EmissionFactors {
        &self.factors
    }

    pub fn averages(&self) -> &AverageEmissions {
        &self.averages
    }
}

fn first_negative(factors: &EmissionFactors) -> Option<(ActivityType, String, f64)> {
    ActivityType::ALL.into_iter().find_map(|t| {
        factors.for_type(t).and_then(|units| {
            units
                .iter()
                .find(|(_, f)| **f < 0.0)
                .map(|(unit, f)| (t, unit.clone(), *f))
        })
    })
}

#[async_trait::async_trait]
impl EmissionFactorLookup for FactorTable {
    async fn emission_factors(&self) -> Result<EmissionFactors> {
        Ok(self.factors.clone())
    }

    async fn average_emissions(&self) -> Result<AverageEmissions> {
        Ok(self.averages.clone())
    }
}
