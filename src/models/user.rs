//! User model for storage.

use serde::{Deserialize, Serialize};

/// User profile stored by the persistence layer.
///
/// The footprint core only checks that a user exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Opaque user ID (also used as document ID)
    pub id: String,
    /// Email address, if shared
    pub email: Option<String>,
    pub display_name: String,
    /// When the user was created (ISO 8601)
    pub created_at: String,
}
