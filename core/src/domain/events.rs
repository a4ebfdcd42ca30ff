// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0

use crate::domain::adoption::{AdoptionRequest, AdoptionRequestId, AdoptionStatus};
use crate::domain::pet::PetId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable snapshot emitted when an adoption request is created or its
/// status changes. Consumed at most once by the notification worker; there
/// is no persistence guarantee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdoptionEvent {
    pub request_id: AdoptionRequestId,
    pub user_id: UserId,
    pub pet_id: PetId,
    pub status: AdoptionStatus,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

impl AdoptionEvent {
    fn snapshot(request: &AdoptionRequest, message: &str) -> Self {
        Self {
            request_id: request.id,
            user_id: request.requester_id,
            pet_id: request.pet_id,
            status: request.status,
            message: message.to_string(),
            occurred_at: Utc::now(),
        }
    }

    pub fn requested(request: &AdoptionRequest) -> Self {
        Self::snapshot(request, "new adoption request created")
    }

    pub fn status_changed(request: &AdoptionRequest) -> Self {
        Self::snapshot(request, "adoption request status updated")
    }
}
