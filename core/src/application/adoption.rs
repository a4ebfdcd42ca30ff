// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0

use crate::domain::adoption::{AdoptionRequest, AdoptionRequestId};
use crate::domain::error::CoreError;
use crate::domain::identity::Identity;
use crate::domain::pet::PetId;
use async_trait::async_trait;

/// Boundary of the adoption-request lifecycle.
///
/// Every operation takes the caller's [`Identity`] and runs the
/// authorization policy before touching any state.
#[async_trait]
pub trait AdoptionService: Send + Sync {
    /// Create a pending request for an available pet.
    async fn apply(
        &self,
        identity: &Identity,
        pet_id: PetId,
        message: Option<String>,
    ) -> Result<AdoptionRequest, CoreError>;

    /// Requests submitted by the caller.
    async fn list_own(&self, identity: &Identity) -> Result<Vec<AdoptionRequest>, CoreError>;

    /// Requests for pets of shelters the caller owns; admins see all
    /// shelters' requests.
    async fn list_for_shelter(
        &self,
        identity: &Identity,
    ) -> Result<Vec<AdoptionRequest>, CoreError>;

    /// Resolve a pending request as approved, adopting the pet.
    async fn approve(
        &self,
        identity: &Identity,
        id: AdoptionRequestId,
    ) -> Result<AdoptionRequest, CoreError>;

    /// Resolve a pending request as rejected.
    async fn reject(
        &self,
        identity: &Identity,
        id: AdoptionRequestId,
    ) -> Result<AdoptionRequest, CoreError>;
}
