// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # PostgreSQL Adoption Request Repository
//!
//! Backs the adoption request store, including the transactional resolution
//! commit: the request row is updated with a status guard (`AND status =
//! 'pending'`) and, on approval, the pet row inside the same transaction.
//! Zero guarded rows means another resolution won the race — the
//! transaction rolls back and the caller sees `Conflict`.

use crate::domain::adoption::{AdoptionRequest, AdoptionRequestId, AdoptionStatus};
use crate::domain::pet::{Pet, PetId};
use crate::domain::repository::{AdoptionRequestRepository, RepositoryError};
use crate::domain::user::UserId;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

pub struct PostgresAdoptionRepository {
    pool: PgPool,
}

impl PostgresAdoptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_request(row: &PgRow) -> Result<AdoptionRequest, RepositoryError> {
    let status_str: String = row.get("status");
    let status = AdoptionStatus::parse(&status_str).ok_or_else(|| {
        RepositoryError::Serialization(format!("unknown adoption status '{status_str}'"))
    })?;

    Ok(AdoptionRequest {
        id: AdoptionRequestId(row.get("id")),
        requester_id: UserId(row.get("requester_id")),
        pet_id: PetId(row.get("pet_id")),
        status,
        message: row.get("message"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[async_trait]
impl AdoptionRequestRepository for PostgresAdoptionRepository {
    async fn create(&self, request: &AdoptionRequest) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO adoption_requests (
                id, requester_id, pet_id, status, message, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(request.id.0)
        .bind(request.requester_id.0)
        .bind(request.pet_id.0)
        .bind(request.status.as_str())
        .bind(&request.message)
        .bind(request.created_at)
        .bind(request.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(
        &self,
        id: AdoptionRequestId,
    ) -> Result<Option<AdoptionRequest>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, requester_id, pet_id, status, message, created_at, updated_at
            FROM adoption_requests
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_request).transpose()
    }

    async fn list_by_requester(
        &self,
        requester: UserId,
    ) -> Result<Vec<AdoptionRequest>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, requester_id, pet_id, status, message, created_at, updated_at
            FROM adoption_requests
            WHERE requester_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(requester.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_request).collect()
    }

    async fn list_by_shelter_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<AdoptionRequest>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT ar.id, ar.requester_id, ar.pet_id, ar.status, ar.message,
                   ar.created_at, ar.updated_at
            FROM adoption_requests ar
            JOIN pets p ON p.id = ar.pet_id
            JOIN shelters s ON s.id = p.shelter_id
            WHERE s.owner_user_id = $1
            ORDER BY ar.created_at
            "#,
        )
        .bind(owner.0)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_request).collect()
    }

    async fn list_all(&self) -> Result<Vec<AdoptionRequest>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, requester_id, pet_id, status, message, created_at, updated_at
            FROM adoption_requests
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_request).collect()
    }

    async fn resolve(
        &self,
        request: &AdoptionRequest,
        adopted_pet: Option<&Pet>,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            r#"
            UPDATE adoption_requests
            SET status = $2, updated_at = $3
            WHERE id = $1 AND status = 'pending'
            "#,
        )
        .bind(request.id.0)
        .bind(request.status.as_str())
        .bind(request.updated_at)
        .execute(&mut *tx)
        .await?;

        if updated.rows_affected() == 0 {
            // Dropping the transaction rolls it back.
            return Err(RepositoryError::Conflict(
                "adoption request was concurrently resolved".to_string(),
            ));
        }

        if let Some(pet) = adopted_pet {
            let pet_updated = sqlx::query(
                r#"
                UPDATE pets
                SET status = $2, updated_at = $3
                WHERE id = $1
                "#,
            )
            .bind(pet.id.0)
            .bind(pet.status.as_str())
            .bind(pet.updated_at)
            .execute(&mut *tx)
            .await?;

            if pet_updated.rows_affected() == 0 {
                return Err(RepositoryError::NotFound(format!("pet {}", pet.id.0)));
            }
        }

        tx.commit().await?;
        Ok(())
    }
}
