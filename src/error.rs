// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Error types for the activity core and the services wrapping it.

/// Errors raised by activities and by collaborators.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    /// A referenced user, emission factor or unit is missing.
    #[error("{0}")]
    NotFound(String),

    /// Activity data failed validation.
    #[error("Invalid activity data: {0}")]
    Validation(String),

    /// An operation was attempted before its inputs were available.
    #[error("{0}")]
    Precondition(String),

    /// An underlying persistence or lookup call failed.
    #[error("Collaborator error: {0}")]
    Collaborator(String),
}

impl AppError {
    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "not_found",
            AppError::Validation(_) => "validation",
            AppError::Precondition(_) => "precondition",
            AppError::Collaborator(_) => "collaborator",
        }
    }
}

/// Service-level errors. Each wraps the message of the failure that aborted
/// the operation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("Error creating activity: {0}")]
    Creation(String),

    #[error("Error calculating footprint: {0}")]
    Footprint(String),
}

impl ServiceError {
    /// The original message of the wrapped failure.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::Creation(msg) | ServiceError::Footprint(msg) => msg,
        }
    }
}

/// Result type alias for the core and its collaborators.
pub type Result<T> = std::result::Result<T, AppError>;
