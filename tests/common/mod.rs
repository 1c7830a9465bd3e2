// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use chrono::{DateTime, TimeZone, Utc};
use footprint_tracker::db::{ActivityPersistence, FirestoreDb, MemoryStore, UserLookup};
use footprint_tracker::error::{AppError, Result};
use footprint_tracker::models::{
    Activity, ActivityType, AverageEmissions, EmissionFactors, NewActivity, User,
};
use footprint_tracker::services::{ActivityService, AuditSink, EmissionFactorLookup, FactorTable};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[allow(dead_code)]
pub const TEST_USER: &str = "user-1";

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection.
#[allow(dead_code)]
pub async fn test_db() -> FirestoreDb {
    FirestoreDb::new("test-project")
        .await
        .expect("Failed to connect to Firestore emulator")
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

#[allow(dead_code)]
pub fn test_user(id: &str) -> User {
    User {
        id: id.to_string(),
        email: None,
        display_name: "Test User".to_string(),
        created_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

#[allow(dead_code)]
pub fn new_activity(activity_type: &str, value: f64, unit: &str) -> NewActivity {
    NewActivity {
        user_id: TEST_USER.to_string(),
        activity_type: activity_type.to_string(),
        value,
        unit: unit.to_string(),
        date: None,
    }
}

#[allow(dead_code)]
pub fn test_factors() -> EmissionFactors {
    EmissionFactors::new()
        .with_factor(ActivityType::Transportation, "km", 0.2)
        .with_factor(ActivityType::Energy, "kwh", 0.5)
        .with_factor(ActivityType::Food, "meal", 2.5)
}

#[allow(dead_code)]
pub fn test_averages(total: Option<f64>) -> AverageEmissions {
    let mut averages = AverageEmissions {
        total,
        ..Default::default()
    };
    averages.by_type.insert(ActivityType::Transportation, 25.0);
    averages.by_type.insert(ActivityType::Energy, 10.0);
    averages
}

/// Audit sink that records every activity it receives.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingAuditSink {
    pub records: Mutex<Vec<(Option<String>, Option<f64>)>>,
}

impl RecordingAuditSink {
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

impl AuditSink for RecordingAuditSink {
    fn activity_created(&self, activity: &Activity) {
        self.records
            .lock()
            .unwrap()
            .push((activity.id.clone(), activity.carbon_emission));
    }
}

/// Store wrapper that counts calls and can be told to fail.
#[allow(dead_code)]
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    pub saves: AtomicUsize,
    pub queries: AtomicUsize,
    pub fail: bool,
}

#[allow(dead_code)]
impl CountingStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ActivityPersistence for CountingStore {
    async fn save(&self, activity: &Activity) -> Result<Activity> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::Collaborator("write rejected".to_string()));
        }
        self.inner.save(activity).await
    }

    async fn find_by_user_and_date_range(
        &self,
        user_id: &str,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<Vec<Activity>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::Collaborator("query timed out".to_string()));
        }
        self.inner
            .find_by_user_and_date_range(user_id, start_date, end_date)
            .await
    }
}

#[async_trait::async_trait]
impl UserLookup for CountingStore {
    async fn exists(&self, user_id: &str) -> Result<bool> {
        self.inner.exists(user_id).await
    }
}

/// Factor lookup that always fails.
#[allow(dead_code)]
pub struct FailingFactors;

#[async_trait::async_trait]
impl EmissionFactorLookup for FailingFactors {
    async fn emission_factors(&self) -> Result<EmissionFactors> {
        Err(AppError::Collaborator("factor service unavailable".to_string()))
    }

    async fn average_emissions(&self) -> Result<AverageEmissions> {
        Err(AppError::Collaborator("factor service unavailable".to_string()))
    }
}

/// Service wired to offline test collaborators.
#[allow(dead_code)]
pub struct TestHarness {
    pub service: ActivityService,
    pub store: Arc<CountingStore>,
    pub audit: Arc<RecordingAuditSink>,
}

/// Create a service over a counting in-memory store with `TEST_USER` registered.
#[allow(dead_code)]
pub fn create_test_service(averages: AverageEmissions) -> TestHarness {
    create_test_service_with(
        Arc::new(FactorTable::new(test_factors(), averages)),
        CountingStore::default(),
    )
}

#[allow(dead_code)]
pub fn create_test_service_with(
    factors: Arc<dyn EmissionFactorLookup>,
    store: CountingStore,
) -> TestHarness {
    store.inner.upsert_user(test_user(TEST_USER));
    let store = Arc::new(store);
    let audit = Arc::new(RecordingAuditSink::default());

    let service = ActivityService::new(store.clone(), factors, store.clone(), audit.clone());

    TestHarness {
        service,
        store,
        audit,
    }
}
