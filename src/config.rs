//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

/// Where users and activities are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Firestore,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "firestore" => Ok(StorageBackend::Firestore),
            other => Err(ConfigError::Invalid(format!(
                "STORAGE_BACKEND must be \"memory\" or \"firestore\", got {:?}",
                other
            ))),
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage backend for users and activities
    pub storage: StorageBackend,
    /// GCP project ID (required for Firestore)
    pub gcp_project_id: Option<String>,
    /// Path to the emission factor table (JSON)
    pub emission_factors_path: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            storage: StorageBackend::Memory,
            gcp_project_id: None,
            emission_factors_path: "data/emission_factors.json".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let storage = match env::var("STORAGE_BACKEND") {
            Ok(v) => v.parse()?,
            Err(_) => StorageBackend::Memory,
        };

        let gcp_project_id = env::var("GCP_PROJECT_ID")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        if storage == StorageBackend::Firestore && gcp_project_id.is_none() {
            return Err(ConfigError::Missing("GCP_PROJECT_ID"));
        }

        Ok(Self {
            storage,
            gcp_project_id,
            emission_factors_path: env::var("EMISSION_FACTORS_PATH")
                .unwrap_or_else(|_| "data/emission_factors.json".to_string()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
