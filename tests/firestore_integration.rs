// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running
//! (FIRESTORE_EMULATOR_HOST set). Without it they are skipped.

use footprint_tracker::db::{ActivityPersistence, UserLookup};
use footprint_tracker::models::{Activity, ActivityType};
use footprint_tracker::services::{ActivityService, FactorTable, TracingAuditSink};
use std::sync::Arc;

mod common;
use common::{date, new_activity, test_averages, test_db, test_factors, test_user};

/// Generate a unique user ID for test isolation.
fn unique_user_id() -> String {
    format!("test-{}", uuid::Uuid::new_v4())
}

#[tokio::test]
async fn test_user_exists_after_upsert() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    assert!(!db.exists(&user_id).await.unwrap());

    db.upsert_user(&test_user(&user_id)).await.unwrap();

    assert!(db.exists(&user_id).await.unwrap());
    let fetched = db.get_user(&user_id).await.unwrap().expect("user stored");
    assert_eq!(fetched.display_name, "Test User");
}

#[tokio::test]
async fn test_save_and_fetch_activity() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();
    let mut activity = Activity::new(&user_id, ActivityType::Energy, 12.0, "kwh", date(2024, 3, 1));
    activity.carbon_emission = Some(6.0);

    let saved = db.save(&activity).await.unwrap();
    let id = saved.id.clone().expect("id assigned");

    let fetched = db.get_activity(&id).await.unwrap().expect("activity stored");
    assert_eq!(fetched, saved);
}

#[tokio::test]
async fn test_saved_date_matches_stored_precision() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();
    let precise = date(2024, 3, 2) + chrono::Duration::nanoseconds(123_456_789);
    let activity = Activity::new(&user_id, ActivityType::Energy, 1.0, "kwh", precise);

    let saved = db.save(&activity).await.unwrap();
    assert_eq!(saved.date, date(2024, 3, 2) + chrono::Duration::milliseconds(123));

    let fetched = db
        .get_activity(saved.id.as_deref().unwrap())
        .await
        .unwrap()
        .expect("activity stored");
    assert_eq!(fetched, saved);

    let found = db
        .find_by_user_and_date_range(&user_id, Some(saved.date), Some(saved.date))
        .await
        .unwrap();
    assert_eq!(found, vec![saved]);
}

#[tokio::test]
async fn test_date_range_query() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    for day in 1..=5 {
        let activity = Activity::new(&user_id, ActivityType::Food, 1.0, "meal", date(2024, 8, day));
        db.save(&activity).await.unwrap();
    }

    let found = db
        .find_by_user_and_date_range(&user_id, Some(date(2024, 8, 2)), Some(date(2024, 8, 4)))
        .await
        .unwrap();

    let days: Vec<_> = found.iter().map(|a| a.date).collect();
    assert_eq!(
        days,
        vec![date(2024, 8, 4), date(2024, 8, 3), date(2024, 8, 2)]
    );
}

#[tokio::test]
async fn test_service_over_firestore() {
    require_emulator!();

    let db = Arc::new(test_db().await);
    let mut data = new_activity("transportation", 50.0, "km");
    data.user_id = unique_user_id();
    db.upsert_user(&test_user(&data.user_id)).await.unwrap();
    let user_id = data.user_id.clone();

    let service = ActivityService::new(
        db.clone(),
        Arc::new(FactorTable::new(test_factors(), test_averages(Some(20.0)))),
        db.clone(),
        Arc::new(TracingAuditSink),
    );

    service.create_activity(data).await.unwrap();
    let summary = service
        .get_user_footprint(&user_id, None, None)
        .await
        .unwrap();

    assert_eq!(summary.total_emission, 10.0);
    assert_eq!(summary.by_category[&ActivityType::Transportation], 10.0);
    assert!(summary.comparison.is_better_than_average);
}
