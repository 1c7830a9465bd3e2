//! Persistence layer: storage traits and their backends.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::Activity;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const ACTIVITIES: &str = "activities";
}

/// Checks whether a referenced user exists.
#[async_trait::async_trait]
pub trait UserLookup: Send + Sync {
    async fn exists(&self, user_id: &str) -> Result<bool>;
}

/// Stores activities and queries them by user and date.
#[async_trait::async_trait]
pub trait ActivityPersistence: Send + Sync {
    /// Store a new activity. Returns a copy carrying the assigned `id`.
    async fn save(&self, activity: &Activity) -> Result<Activity>;

    /// Activities for `user_id` within the inclusive bounds, newest first.
    async fn find_by_user_and_date_range(
        &self,
        user_id: &str,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Result<Vec<Activity>>;
}

/// Whether `date` falls within the optional inclusive bounds.
pub(crate) fn in_range(
    date: DateTime<Utc>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
) -> bool {
    start_date.is_none_or(|start| date >= start) && end_date.is_none_or(|end| date <= end)
}
