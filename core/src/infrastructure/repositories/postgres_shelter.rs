// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! # PostgreSQL Shelter Repository

use crate::domain::repository::{RepositoryError, ShelterRepository};
use crate::domain::shelter::{Shelter, ShelterId};
use crate::domain::user::UserId;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

pub struct PostgresShelterRepository {
    pool: PgPool,
}

impl PostgresShelterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_shelter(row: &PgRow) -> Shelter {
    Shelter {
        id: ShelterId(row.get("id")),
        name: row.get("name"),
        address: row.get("address"),
        phone: row.get("phone"),
        owner_user_id: UserId(row.get("owner_user_id")),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl ShelterRepository for PostgresShelterRepository {
    async fn save(&self, shelter: &Shelter) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO shelters (id, name, address, phone, owner_user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                address = EXCLUDED.address,
                phone = EXCLUDED.phone,
                owner_user_id = EXCLUDED.owner_user_id,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(shelter.id.0)
        .bind(&shelter.name)
        .bind(&shelter.address)
        .bind(&shelter.phone)
        .bind(shelter.owner_user_id.0)
        .bind(shelter.created_at)
        .bind(shelter.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: ShelterId) -> Result<Option<Shelter>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, address, phone, owner_user_id, created_at, updated_at
            FROM shelters
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(row_to_shelter))
    }

    async fn list_all(&self) -> Result<Vec<Shelter>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, address, phone, owner_user_id, created_at, updated_at
            FROM shelters
            ORDER BY created_at
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(row_to_shelter).collect())
    }

    async fn delete(&self, id: ShelterId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM shelters WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
