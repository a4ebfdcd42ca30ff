// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # PostgreSQL Pet Repository
//!
//! Production `PetRepository` implementation backed by the `pets` table.

use crate::domain::pet::{Pet, PetId, PetStatus};
use crate::domain::repository::{PetFilter, PetRepository, RepositoryError};
use crate::domain::shelter::ShelterId;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

pub struct PostgresPetRepository {
    pool: PgPool,
}

impl PostgresPetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_pet(row: &PgRow) -> Result<Pet, RepositoryError> {
    let status_str: String = row.get("status");
    let status = PetStatus::parse(&status_str).ok_or_else(|| {
        RepositoryError::Serialization(format!("unknown pet status '{status_str}'"))
    })?;

    Ok(Pet {
        id: PetId(row.get("id")),
        shelter_id: ShelterId(row.get("shelter_id")),
        name: row.get("name"),
        species: row.get("species"),
        breed: row.get("breed"),
        age: row.get("age"),
        description: row.get("description"),
        status,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

#[async_trait]
impl PetRepository for PostgresPetRepository {
    async fn save(&self, pet: &Pet) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO pets (
                id, shelter_id, name, species, breed, age, description,
                status, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                shelter_id = EXCLUDED.shelter_id,
                name = EXCLUDED.name,
                species = EXCLUDED.species,
                breed = EXCLUDED.breed,
                age = EXCLUDED.age,
                description = EXCLUDED.description,
                status = EXCLUDED.status,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(pet.id.0)
        .bind(pet.shelter_id.0)
        .bind(&pet.name)
        .bind(&pet.species)
        .bind(&pet.breed)
        .bind(pet.age)
        .bind(&pet.description)
        .bind(pet.status.as_str())
        .bind(pet.created_at)
        .bind(pet.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: PetId) -> Result<Option<Pet>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, shelter_id, name, species, breed, age, description,
                   status, created_at, updated_at
            FROM pets
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(row_to_pet).transpose()
    }

    async fn list(&self, filter: &PetFilter) -> Result<Vec<Pet>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, shelter_id, name, species, breed, age, description,
                   status, created_at, updated_at
            FROM pets
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR species = $2)
            ORDER BY created_at
            "#,
        )
        .bind(filter.status.map(|status| status.as_str()))
        .bind(filter.species.as_deref())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_pet).collect()
    }

    async fn delete(&self, id: PetId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
