// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (existence checks for activity creation)
//! - Activities (stored with computed emissions, queried by date range)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::db::{collections, ActivityPersistence, UserLookup};
use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityType, User};
use crate::time_utils::{format_utc_rfc3339, parse_utc_rfc3339, truncate_to_millis};

/// Stored activity document.
///
/// Dates are fixed-width RFC3339 strings so range filters and ordering work
/// on the string value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityDocument {
    pub id: String,
    pub user_id: String,
    pub activity_type: ActivityType,
    pub value: f64,
    pub unit: String,
    pub date: String,
    pub carbon_emission: Option<f64>,
    /// When this document was written
    pub created_at: String,
}

impl ActivityDocument {
    fn from_activity(id: String, activity: &Activity) -> Self {
        Self {
            id,
            user_id: activity.user_id.clone(),
            activity_type: activity.activity_type,
            value: activity.value,
            unit: activity.unit.clone(),
            date: format_utc_rfc3339(activity.date),
            carbon_emission: activity.carbon_emission,
            created_at: format_utc_rfc3339(Utc::now()),
        }
    }

    fn into_activity(self) -> Result<Activity> {
        let date = parse_utc_rfc3339(&self.date).map_err(|e| {
            AppError::Collaborator(format!("Invalid stored date for activity {}: {}", self.id, e))
        })?;

        Ok(Activity {
            id: Some(self.id),
            user_id: self.user_id,
            activity_type: self.activity_type,
            value: self.value,
            unit: self.unit,
            date,
            carbon_emission: self.carbon_emission,
        })
    }
}

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self> {
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id).await.map_err(|e| {
            AppError::Collaborator(format!("Failed to connect to Firestore: {}", e))
        })?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Collaborator(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    fn get_client(&self) -> Result<&firestore::FirestoreDb> {
        self.client.as_ref().ok_or_else(|| {
            AppError::Collaborator("Database not connected (offline mode)".to_string())
        })
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>> {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(user_id)
            .await
            .map_err(|e| AppError::Collaborator(e.to_string()))
    }

    /// Create or update a user.
    pub async fn upsert_user(&self, user: &User) -> Result<()> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Collaborator(e.to_string()))?;
        Ok(())
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// Get an activity by ID.
    pub async fn get_activity(&self, activity_id: &str) -> Result<Option<Activity>> {
        let doc: Option<ActivityDocument> = self
            .get_client()?
            .fluent()
            .select()
            .by_id_in(collections::ACTIVITIES)
            .obj()
            .one(activity_id)
            .await
            .map_err(|e| AppError::Collaborator(e.to_string()))?;

        doc.map(ActivityDocument::into_activity).transpose()
    }
}

#[async_trait::async_trait]
impl UserLookup for FirestoreDb {
    async fn exists(&self, user_id: &str) -> Result<bool> {
        Ok(self.get_user(user_id).await?.is_some())
    }
}

#[async_trait::async_trait]
impl ActivityPersistence for FirestoreDb {
    async fn save(&self, activity: &Activity) -> Result<Activity> {
        let id = uuid::Uuid::new_v4().to_string();
        let stored = Activity {
            id: Some(id.clone()),
            date: truncate_to_millis(activity.date),
            ..activity.clone()
        };
        let doc = ActivityDocument::from_activity(id.clone(), &stored);

        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::ACTIVITIES)
            .document_id(&id)
            .object(&doc)
            .execute()
            .await
            .map_err(|e| AppError::Collaborator(e.to_string()))?;

        tracing::debug!(activity_id = %id, user_id = %activity.user_id, "Stored activity");

        Ok(stored)
    }

    async fn find_by_user_and_date_range(
        &self,
        user_id: &str,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<Vec<Activity>> {
        let user_id = user_id.to_string();
        let start = start_date.map(format_utc_rfc3339);
        let end = end_date.map(format_utc_rfc3339);

        let docs: Vec<ActivityDocument> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::ACTIVITIES)
            .filter(move |q| {
                q.for_all([
                    q.field("user_id").eq(user_id.clone()),
                    start
                        .clone()
                        .and_then(|d| q.field("date").greater_than_or_equal(d)),
                    end.clone().and_then(|d| q.field("date").less_than_or_equal(d)),
                ])
            })
            .order_by([("date", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Collaborator(e.to_string()))?;

        docs.into_iter()
            .map(ActivityDocument::into_activity)
            .collect()
    }
}
