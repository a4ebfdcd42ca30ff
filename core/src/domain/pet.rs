// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0

use crate::domain::shelter::ShelterId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PetId(pub Uuid);

impl PetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for PetId {
    fn default() -> Self {
        Self::new()
    }
}

/// A pet must be `Available` for a new adoption request to be created
/// against it; it becomes `Adopted` only through an approved request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetStatus {
    Available,
    Reserved,
    Adopted,
}

impl PetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PetStatus::Available => "available",
            PetStatus::Reserved => "reserved",
            PetStatus::Adopted => "adopted",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(PetStatus::Available),
            "reserved" => Some(PetStatus::Reserved),
            "adopted" => Some(PetStatus::Adopted),
            _ => None,
        }
    }
}

impl std::fmt::Display for PetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pet {
    pub id: PetId,
    pub shelter_id: ShelterId,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub description: Option<String>,
    pub status: PetStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// New pets enter the catalog as `Available`.
    pub fn new(
        shelter_id: ShelterId,
        name: String,
        species: String,
        breed: Option<String>,
        age: Option<i32>,
        description: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: PetId::new(),
            shelter_id,
            name,
            species,
            breed,
            age,
            description,
            status: PetStatus::Available,
            created_at: now,
            updated_at: now,
        }
    }

    /// Side effect of an approved adoption request. The caller is
    /// responsible for persisting this together with the request update.
    pub fn mark_adopted(&mut self) {
        self.status = PetStatus::Adopted;
        self.updated_at = Utc::now();
    }
}
