// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Standard adoption lifecycle service.
//!
//! Orders of operations, for every mutation: authorization first, then the
//! status-machine check, then the store commit, then the fire-and-forget
//! lifecycle event. Resolution re-reads the request and the pet under a
//! per-request-id lock and re-validates both at commit time, so a stale
//! caller can never double-adopt a pet.

use crate::application::adoption::AdoptionService;
use crate::domain::adoption::{AdoptionRequest, AdoptionRequestId, AdoptionStatus};
use crate::domain::error::CoreError;
use crate::domain::events::AdoptionEvent;
use crate::domain::identity::Identity;
use crate::domain::pet::{PetId, PetStatus};
use crate::domain::policy;
use crate::domain::repository::{AdoptionRequestRepository, PetRepository, ShelterRepository};
use crate::infrastructure::event_queue::EventDispatcher;
use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

pub struct StandardAdoptionService {
    requests: Arc<dyn AdoptionRequestRepository>,
    pets: Arc<dyn PetRepository>,
    shelters: Arc<dyn ShelterRepository>,
    dispatcher: EventDispatcher,
    // Serializes resolution per request id; the store's compare-and-swap is
    // the correctness guard, this keeps losers from doing wasted work.
    resolution_locks: DashMap<AdoptionRequestId, Arc<Mutex<()>>>,
}

impl StandardAdoptionService {
    pub fn new(
        requests: Arc<dyn AdoptionRequestRepository>,
        pets: Arc<dyn PetRepository>,
        shelters: Arc<dyn ShelterRepository>,
        dispatcher: EventDispatcher,
    ) -> Self {
        Self {
            requests,
            pets,
            shelters,
            dispatcher,
            resolution_locks: DashMap::new(),
        }
    }

    async fn resolve(
        &self,
        identity: &Identity,
        id: AdoptionRequestId,
        new_status: AdoptionStatus,
    ) -> Result<AdoptionRequest, CoreError> {
        let lock = { self.resolution_locks.entry(id).or_default().value().clone() };
        let _guard = lock.lock().await;

        let mut request = self
            .requests
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("adoption request {}", id.0)))?;

        let mut pet = self
            .pets
            .find_by_id(request.pet_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("pet {}", request.pet_id.0)))?;

        let shelter = self
            .shelters
            .find_by_id(pet.shelter_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("shelter {}", pet.shelter_id.0)))?;

        // Authorization strictly precedes any mutation.
        policy::can_resolve(identity, shelter.owner_user_id).require()?;

        request.transition_to(new_status)?;

        let adopted_pet = if new_status == AdoptionStatus::Approved {
            if pet.status != PetStatus::Available {
                return Err(CoreError::InvalidState(format!(
                    "pet {} is no longer available",
                    pet.id.0
                )));
            }
            pet.mark_adopted();
            Some(&pet)
        } else {
            None
        };

        // One logical transaction: request update plus (on approval) the pet
        // update. A lost race surfaces as Conflict and nothing is applied.
        self.requests.resolve(&request, adopted_pet).await?;

        debug!(request_id = ?request.id, status = %request.status, "adoption request resolved");
        self.dispatcher.publish(AdoptionEvent::status_changed(&request));
        Ok(request)
    }
}

#[async_trait]
impl AdoptionService for StandardAdoptionService {
    async fn apply(
        &self,
        identity: &Identity,
        pet_id: PetId,
        message: Option<String>,
    ) -> Result<AdoptionRequest, CoreError> {
        policy::can_apply(identity).require()?;

        let pet = self
            .pets
            .find_by_id(pet_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("pet {}", pet_id.0)))?;

        if pet.status != PetStatus::Available {
            return Err(CoreError::InvalidState(format!(
                "pet {} is not available for adoption",
                pet_id.0
            )));
        }

        let request = AdoptionRequest::new(identity.user_id, pet_id, message);
        self.requests.create(&request).await?;

        debug!(request_id = ?request.id, pet_id = ?pet_id, "adoption request created");
        self.dispatcher.publish(AdoptionEvent::requested(&request));
        Ok(request)
    }

    async fn list_own(&self, identity: &Identity) -> Result<Vec<AdoptionRequest>, CoreError> {
        Ok(self.requests.list_by_requester(identity.user_id).await?)
    }

    async fn list_for_shelter(
        &self,
        identity: &Identity,
    ) -> Result<Vec<AdoptionRequest>, CoreError> {
        policy::can_list_for_shelter(identity).require()?;

        // Admins see every shelter's requests; shelter owners only their own.
        let requests = if identity.is_admin() {
            self.requests.list_all().await?
        } else {
            self.requests.list_by_shelter_owner(identity.user_id).await?
        };
        Ok(requests)
    }

    async fn approve(
        &self,
        identity: &Identity,
        id: AdoptionRequestId,
    ) -> Result<AdoptionRequest, CoreError> {
        self.resolve(identity, id, AdoptionStatus::Approved).await
    }

    async fn reject(
        &self,
        identity: &Identity,
        id: AdoptionRequestId,
    ) -> Result<AdoptionRequest, CoreError> {
        self.resolve(identity, id, AdoptionStatus::Rejected).await
    }
}
