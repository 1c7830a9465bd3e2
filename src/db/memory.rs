// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store for local runs and tests.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;

use crate::db::{in_range, ActivityPersistence, UserLookup};
use crate::error::Result;
use crate::models::{Activity, User};
use crate::time_utils::truncate_to_millis;

/// DashMap-backed users and activities, shared across clones.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<String, User>>,
    activities: Arc<DashMap<String, Activity>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_user(&self, user: User) {
        self.users.insert(user.id.clone(), user);
    }

    pub fn get_activity(&self, activity_id: &str) -> Option<Activity> {
        self.activities.get(activity_id).map(|a| a.value().clone())
    }

    /// Number of stored activities.
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }
}

#[async_trait::async_trait]
impl UserLookup for MemoryStore {
    async fn exists(&self, user_id: &str) -> Result<bool> {
        Ok(self.users.contains_key(user_id))
    }
}

#[async_trait::async_trait]
impl ActivityPersistence for MemoryStore {
    async fn save(&self, activity: &Activity) -> Result<Activity> {
        let id = uuid::Uuid::new_v4().to_string();
        let stored = Activity {
            id: Some(id.clone()),
            date: truncate_to_millis(activity.date),
            ..activity.clone()
        };

        self.activities.insert(id.clone(), stored.clone());
        tracing::debug!(activity_id = %id, user_id = %stored.user_id, "Stored activity in memory");

        Ok(stored)
    }

    async fn find_by_user_and_date_range(
        &self,
        user_id: &str,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<Vec<Activity>> {
        let mut activities: Vec<Activity> = self
            .activities
            .iter()
            .filter(|entry| {
                entry.user_id == user_id && in_range(entry.date, start_date, end_date)
            })
            .map(|entry| entry.value().clone())
            .collect();

        activities.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(activities)
    }
}
