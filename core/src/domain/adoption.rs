// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Adoption request aggregate and its status machine.
//!
//! `pending` is the only non-terminal status: a request moves at most once,
//! to `approved`, `rejected`, `cancelled` or `expired`, and is immutable
//! afterwards. Transition legality lives here; cross-entity coupling to the
//! pet record (approval adopts the pet) is enforced by the adoption service.

use crate::domain::error::CoreError;
use crate::domain::pet::PetId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AdoptionRequestId(pub Uuid);

impl AdoptionRequestId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for AdoptionRequestId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdoptionStatus {
    Pending,
    Approved,
    Rejected,
    Cancelled,
    Expired,
}

impl AdoptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdoptionStatus::Pending => "pending",
            AdoptionStatus::Approved => "approved",
            AdoptionStatus::Rejected => "rejected",
            AdoptionStatus::Cancelled => "cancelled",
            AdoptionStatus::Expired => "expired",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(AdoptionStatus::Pending),
            "approved" => Some(AdoptionStatus::Approved),
            "rejected" => Some(AdoptionStatus::Rejected),
            "cancelled" => Some(AdoptionStatus::Cancelled),
            "expired" => Some(AdoptionStatus::Expired),
            _ => None,
        }
    }

    /// Legal moves: `pending` to any other status, nothing else.
    pub fn can_transition_to(self, next: AdoptionStatus) -> bool {
        self == AdoptionStatus::Pending && next != AdoptionStatus::Pending
    }
}

impl std::fmt::Display for AdoptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionRequest {
    pub id: AdoptionRequestId,
    pub requester_id: UserId,
    pub pet_id: PetId,
    pub status: AdoptionStatus,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdoptionRequest {
    pub fn new(requester_id: UserId, pet_id: PetId, message: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: AdoptionRequestId::new(),
            requester_id,
            pet_id,
            status: AdoptionStatus::Pending,
            message,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a status change, refusing anything the status machine does not
    /// allow. Refreshes `updated_at` on success.
    pub fn transition_to(&mut self, next: AdoptionStatus) -> Result<(), CoreError> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidState(format!(
                "adoption request {} cannot move from {} to {}",
                self.id.0, self.status, next
            )));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn is_resolved(&self) -> bool {
        self.status != AdoptionStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> AdoptionRequest {
        AdoptionRequest::new(UserId::new(), PetId::new(), Some("please".to_string()))
    }

    #[test]
    fn new_request_starts_pending() {
        let req = request();
        assert_eq!(req.status, AdoptionStatus::Pending);
        assert!(!req.is_resolved());
        assert!(req.updated_at >= req.created_at);
    }

    #[test]
    fn pending_resolves_once() {
        let mut req = request();
        req.transition_to(AdoptionStatus::Approved).unwrap();
        assert_eq!(req.status, AdoptionStatus::Approved);
        assert!(req.is_resolved());
        assert!(req.updated_at >= req.created_at);

        let err = req.transition_to(AdoptionStatus::Rejected).unwrap_err();
        assert!(matches!(err, CoreError::InvalidState(_)));
        assert_eq!(req.status, AdoptionStatus::Approved);
    }

    #[test]
    fn every_non_pending_source_is_terminal() {
        let terminal = [
            AdoptionStatus::Approved,
            AdoptionStatus::Rejected,
            AdoptionStatus::Cancelled,
            AdoptionStatus::Expired,
        ];
        for from in terminal {
            for to in [
                AdoptionStatus::Pending,
                AdoptionStatus::Approved,
                AdoptionStatus::Rejected,
                AdoptionStatus::Cancelled,
                AdoptionStatus::Expired,
            ] {
                assert!(!from.can_transition_to(to), "{from} -> {to} must be illegal");
            }
        }
    }

    #[test]
    fn pending_cannot_transition_to_itself() {
        assert!(!AdoptionStatus::Pending.can_transition_to(AdoptionStatus::Pending));
    }

    #[test]
    fn transition_refreshes_updated_at() {
        let mut req = request();
        let before = req.updated_at;
        req.transition_to(AdoptionStatus::Cancelled).unwrap();
        assert!(req.updated_at >= before);
    }
}
