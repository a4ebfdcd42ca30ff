// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0

use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShelterId(pub Uuid);

impl ShelterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for ShelterId {
    fn default() -> Self {
        Self::new()
    }
}

/// `owner_user_id` is the identity authorized to act on adoption requests
/// for pets belonging to this shelter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shelter {
    pub id: ShelterId,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub owner_user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Shelter {
    pub fn new(
        name: String,
        address: Option<String>,
        phone: Option<String>,
        owner_user_id: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ShelterId::new(),
            name,
            address,
            phone,
            owner_user_id,
            created_at: now,
            updated_at: now,
        }
    }
}
