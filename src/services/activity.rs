// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity service.
//!
//! Handles the core workflows:
//! 1. Create: check the user, compute the emission, store the activity
//! 2. Footprint: load a user's activities for a period and aggregate them
//!    against the average footprint

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::db::{ActivityPersistence, UserLookup};
use crate::error::{AppError, Result, ServiceError};
use crate::models::{
    Activity, Comparison, FootprintAggregator, FootprintSummary, NewActivity, Period,
};
use crate::services::{AuditSink, EmissionFactorLookup};

/// Orchestrates activity creation and footprint queries over injected collaborators.
#[derive(Clone)]
pub struct ActivityService {
    users: Arc<dyn UserLookup>,
    factors: Arc<dyn EmissionFactorLookup>,
    store: Arc<dyn ActivityPersistence>,
    audit: Arc<dyn AuditSink>,
}

impl ActivityService {
    pub fn new(
        users: Arc<dyn UserLookup>,
        factors: Arc<dyn EmissionFactorLookup>,
        store: Arc<dyn ActivityPersistence>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            users,
            factors,
            store,
            audit,
        }
    }

    /// Create an activity, defaulting its date to the current time.
    pub async fn create_activity(
        &self,
        data: NewActivity,
    ) -> std::result::Result<Activity, ServiceError> {
        self.create_activity_at(data, Utc::now()).await
    }

    /// Create an activity, using `now` as the date when none was given.
    pub async fn create_activity_at(
        &self,
        data: NewActivity,
        now: DateTime<Utc>,
    ) -> std::result::Result<Activity, ServiceError> {
        let user_id = data.user_id.clone();

        match self.try_create(data, now).await {
            Ok(activity) => {
                self.audit.activity_created(&activity);
                Ok(activity)
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %user_id,
                    kind = e.kind(),
                    error = %e,
                    "Activity creation failed"
                );
                Err(ServiceError::Creation(e.to_string()))
            }
        }
    }

    async fn try_create(&self, data: NewActivity, now: DateTime<Utc>) -> Result<Activity> {
        // 1. The user must exist before anything else happens
        if !self.users.exists(&data.user_id).await? {
            return Err(AppError::NotFound("User does not exist".to_string()));
        }

        // 2. Current factor table
        let factors = self.factors.emission_factors().await?;

        // 3-4. Build and validate
        let mut activity = data.into_activity(now)?;
        if let Some(reason) = activity.validation_error() {
            return Err(AppError::Validation(reason.to_string()));
        }

        // 5. Emission
        let emission = activity.calculate_emission(&factors)?;
        tracing::debug!(
            user_id = %activity.user_id,
            activity_type = %activity.activity_type,
            carbon_emission = emission,
            "Computed emission"
        );

        // 6. Single save
        self.store.save(&activity).await
    }

    /// Aggregate a user's footprint over an optional inclusive date range.
    pub async fn get_user_footprint(
        &self,
        user_id: &str,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> std::result::Result<FootprintSummary, ServiceError> {
        self.try_footprint(user_id, start_date, end_date)
            .await
            .map_err(|e| {
                tracing::error!(
                    user_id,
                    kind = e.kind(),
                    error = %e,
                    "Footprint calculation failed"
                );
                ServiceError::Footprint(e.to_string())
            })
    }

    async fn try_footprint(
        &self,
        user_id: &str,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<FootprintSummary> {
        let activities = self
            .store
            .find_by_user_and_date_range(user_id, start_date, end_date)
            .await?;

        let averages = self.factors.average_emissions().await?;
        let period = Period {
            start_date,
            end_date,
        };
        let summary = FootprintAggregator::summarize(user_id, period, &activities, &averages)?;

        tracing::info!(
            user_id,
            activity_count = summary.activity_count,
            total_emission = summary.total_emission,
            "Footprint calculated"
        );

        Ok(summary)
    }

    /// List a user's activities, newest first.
    pub async fn list_activities(
        &self,
        user_id: &str,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> std::result::Result<Vec<Activity>, ServiceError> {
        self.store
            .find_by_user_and_date_range(user_id, start_date, end_date)
            .await
            .map_err(|e| {
                tracing::error!(user_id, error = %e, "Listing activities failed");
                ServiceError::Footprint(e.to_string())
            })
    }

    /// Compare a computed activity against the average for its type.
    pub async fn compare_activity(
        &self,
        activity: &Activity,
    ) -> std::result::Result<Comparison, ServiceError> {
        self.factors
            .average_emissions()
            .await
            .and_then(|averages| activity.compare_to_average(&averages))
            .map_err(|e| {
                tracing::warn!(
                    activity_id = ?activity.id,
                    error = %e,
                    "Activity comparison failed"
                );
                ServiceError::Footprint(e.to_string())
            })
    }
}
