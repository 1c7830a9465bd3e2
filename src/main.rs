// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Footprint report
//!
//! Prints a user's carbon footprint summary as JSON.
//!
//! Usage: `footprint-tracker <user_id> [start_date] [end_date]`, dates in RFC 3339.

use anyhow::Context;
use footprint_tracker::{
    config::{Config, StorageBackend},
    db::{ActivityPersistence, FirestoreDb, MemoryStore, UserLookup},
    services::{ActivityService, FactorTable, TracingAuditSink},
    time_utils::parse_utc_rfc3339,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging();

    let mut args = std::env::args().skip(1);
    let user_id = args
        .next()
        .context("usage: footprint-tracker <user_id> [start_date] [end_date]")?;
    let start_date = args
        .next()
        .map(|d| parse_utc_rfc3339(&d).with_context(|| format!("invalid start date {:?}", d)))
        .transpose()?;
    let end_date = args
        .next()
        .map(|d| parse_utc_rfc3339(&d).with_context(|| format!("invalid end date {:?}", d)))
        .transpose()?;

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(storage = ?config.storage, "Starting footprint report");

    let factors = FactorTable::load_from_file(&config.emission_factors_path)
        .context("Failed to load emission factors")?;
    tracing::info!(path = %config.emission_factors_path, "Emission factors loaded");

    let (users, store): (Arc<dyn UserLookup>, Arc<dyn ActivityPersistence>) = match config.storage
    {
        StorageBackend::Firestore => {
            let project_id = config
                .gcp_project_id
                .as_deref()
                .context("GCP_PROJECT_ID is required for Firestore")?;
            let db = Arc::new(
                FirestoreDb::new(project_id)
                    .await
                    .context("Failed to connect to Firestore")?,
            );
            (
                db.clone() as Arc<dyn UserLookup>,
                db as Arc<dyn ActivityPersistence>,
            )
        }
        StorageBackend::Memory => {
            let store = Arc::new(MemoryStore::new());
            (
                store.clone() as Arc<dyn UserLookup>,
                store as Arc<dyn ActivityPersistence>,
            )
        }
    };

    let service = ActivityService::new(
        users,
        Arc::new(factors),
        store,
        Arc::new(TracingAuditSink),
    );

    let summary = service
        .get_user_footprint(&user_id, start_date, end_date)
        .await?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("footprint_tracker=debug,info")
            }),
        )
        .with(format)
        .init();
}
