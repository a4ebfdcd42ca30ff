// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # Domain Repository Interfaces
//!
//! Persistence contracts for each aggregate root, following the DDD
//! Repository pattern: one repository per aggregate, interface defined in
//! the domain layer, implemented in `crate::infrastructure::repositories`.
//!
//! | Trait | Aggregate | Implementations |
//! |-------|-----------|----------------|
//! | `PetRepository` | `Pet` | `InMemoryStore`, `PostgresPetRepository` |
//! | `ShelterRepository` | `Shelter` | `InMemoryStore`, `PostgresShelterRepository` |
//! | `AdoptionRequestRepository` | `AdoptionRequest` | `InMemoryStore`, `PostgresAdoptionRepository` |
//! | `UserRepository` | `User` | `InMemoryUserRepository`, `PostgresUserRepository` |
//!
//! Concrete implementations are selected at server startup: in-memory for
//! development and tests, PostgreSQL for production.

use crate::domain::adoption::{AdoptionRequest, AdoptionRequestId};
use crate::domain::pet::{Pet, PetId, PetStatus};
use crate::domain::shelter::{Shelter, ShelterId};
use crate::domain::user::{User, UserId};
use async_trait::async_trait;

/// Optional filters for pet catalog listings.
#[derive(Debug, Clone, Default)]
pub struct PetFilter {
    pub status: Option<PetStatus>,
    pub species: Option<String>,
}

#[async_trait]
pub trait PetRepository: Send + Sync {
    /// Save pet (create or update).
    async fn save(&self, pet: &Pet) -> Result<(), RepositoryError>;

    /// Find pet by ID.
    async fn find_by_id(&self, id: PetId) -> Result<Option<Pet>, RepositoryError>;

    /// List pets matching the filter.
    async fn list(&self, filter: &PetFilter) -> Result<Vec<Pet>, RepositoryError>;

    /// Delete pet by ID.
    async fn delete(&self, id: PetId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait ShelterRepository: Send + Sync {
    /// Save shelter (create or update).
    async fn save(&self, shelter: &Shelter) -> Result<(), RepositoryError>;

    /// Find shelter by ID.
    async fn find_by_id(&self, id: ShelterId) -> Result<Option<Shelter>, RepositoryError>;

    /// List all shelters.
    async fn list_all(&self) -> Result<Vec<Shelter>, RepositoryError>;

    /// Delete shelter by ID.
    async fn delete(&self, id: ShelterId) -> Result<(), RepositoryError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a user. Fails with `Conflict` when the email is taken.
    async fn create(&self, user: &User) -> Result<(), RepositoryError>;

    /// Find user by ID.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError>;

    /// Find user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;
}

#[async_trait]
pub trait AdoptionRequestRepository: Send + Sync {
    /// Persist a newly created (pending) request.
    async fn create(&self, request: &AdoptionRequest) -> Result<(), RepositoryError>;

    /// Find request by ID.
    async fn find_by_id(
        &self,
        id: AdoptionRequestId,
    ) -> Result<Option<AdoptionRequest>, RepositoryError>;

    /// Requests submitted by the given user.
    async fn list_by_requester(
        &self,
        requester: UserId,
    ) -> Result<Vec<AdoptionRequest>, RepositoryError>;

    /// Requests for pets whose shelter is owned by the given user.
    async fn list_by_shelter_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<AdoptionRequest>, RepositoryError>;

    /// All requests, newest first. Admin listing only.
    async fn list_all(&self) -> Result<Vec<AdoptionRequest>, RepositoryError>;

    /// Commit a resolution: the request update and, on approval, the pet
    /// update, as one atomic unit. The stored request must still be
    /// `pending` at commit time — a lost race fails with `Conflict` and
    /// leaves both records untouched.
    async fn resolve(
        &self,
        request: &AdoptionRequest,
        adopted_pet: Option<&Pet>,
    ) -> Result<(), RepositoryError>;
}

/// Repository errors.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("entity not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound("row not found".to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepositoryError::Conflict(db.to_string())
            }
            _ => RepositoryError::Database(err.to_string()),
        }
    }
}
