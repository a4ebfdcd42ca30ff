// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Authenticated caller context.
//!
//! An `Identity` is established once per inbound operation by verifying a
//! bearer token; the core trusts it unconditionally and never mutates it.

use crate::domain::user::{Role, UserId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token issuance failed: {0}")]
    Issuance(String),

    #[error("invalid or expired token")]
    Invalid,
}

/// Opaque credential collaborator: issues and verifies the bearer tokens
/// that carry an [`Identity`] across the HTTP boundary.
pub trait TokenService: Send + Sync {
    fn issue(&self, identity: &Identity) -> Result<String, TokenError>;
    fn verify(&self, token: &str) -> Result<Identity, TokenError>;
}
