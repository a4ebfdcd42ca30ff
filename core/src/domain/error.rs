// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Error taxonomy shared by all core operations.
//!
//! Every service method returns one of these kinds; the presentation layer
//! maps each to a transport status. The core performs no retries — a caller
//! that receives `Internal` must retry the whole operation.

use crate::domain::repository::RepositoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Pet, shelter or adoption request absent.
    #[error("not found: {0}")]
    NotFound(String),

    /// Pet not available, or an illegal status transition/value.
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// Authorization denied; no state was mutated.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Lost a concurrent resolution race.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Persistence failure surfaced to the caller.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for CoreError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => CoreError::NotFound(msg),
            RepositoryError::Conflict(msg) => CoreError::Conflict(msg),
            RepositoryError::Database(msg) => CoreError::Internal(msg),
            RepositoryError::Serialization(msg) => CoreError::Internal(msg),
        }
    }
}
