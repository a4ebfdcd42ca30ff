// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0

//! Repository Implementations
//!
//! Infrastructure implementations of the repository abstractions defined in
//! the domain layer.
//!
//! # Available Implementations
//!
//! ## PostgreSQL Repositories
//!
//! Production implementations backed by PostgreSQL:
//! - **PostgresPetRepository** / **PostgresShelterRepository** /
//!   **PostgresUserRepository** - per-aggregate persistence
//! - **PostgresAdoptionRepository** - adoption requests, including the
//!   transactional request+pet resolution commit
//!
//! ## In-Memory Repositories
//!
//! Lightweight implementations for development and testing:
//! - **InMemoryStore** - pets, shelters and adoption requests behind a
//!   single lock, so `resolve` can commit the request and pet mutation as
//!   one unit (the same guarantee the PostgreSQL transaction gives)
//! - **InMemoryUserRepository** - account records

pub mod postgres_adoption;
pub mod postgres_pet;
pub mod postgres_shelter;
pub mod postgres_user;

pub use postgres_adoption::PostgresAdoptionRepository;
pub use postgres_pet::PostgresPetRepository;
pub use postgres_shelter::PostgresShelterRepository;
pub use postgres_user::PostgresUserRepository;

use crate::domain::adoption::{AdoptionRequest, AdoptionRequestId, AdoptionStatus};
use crate::domain::pet::{Pet, PetId};
use crate::domain::repository::{
    AdoptionRequestRepository, PetFilter, PetRepository, RepositoryError, ShelterRepository,
    UserRepository,
};
use crate::domain::shelter::{Shelter, ShelterId};
use crate::domain::user::{User, UserId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Default)]
struct StoreState {
    pets: HashMap<PetId, Pet>,
    shelters: HashMap<ShelterId, Shelter>,
    requests: HashMap<AdoptionRequestId, AdoptionRequest>,
}

/// Shared-state store backing the pet, shelter and adoption repositories.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PetRepository for InMemoryStore {
    async fn save(&self, pet: &Pet) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        state.pets.insert(pet.id, pet.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: PetId) -> Result<Option<Pet>, RepositoryError> {
        let state = self.state.read().unwrap();
        Ok(state.pets.get(&id).cloned())
    }

    async fn list(&self, filter: &PetFilter) -> Result<Vec<Pet>, RepositoryError> {
        let state = self.state.read().unwrap();
        let mut pets: Vec<Pet> = state
            .pets
            .values()
            .filter(|pet| filter.status.is_none_or(|status| pet.status == status))
            .filter(|pet| {
                filter
                    .species
                    .as_deref()
                    .is_none_or(|species| pet.species == species)
            })
            .cloned()
            .collect();
        pets.sort_by_key(|pet| pet.created_at);
        Ok(pets)
    }

    async fn delete(&self, id: PetId) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        state.pets.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl ShelterRepository for InMemoryStore {
    async fn save(&self, shelter: &Shelter) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        state.shelters.insert(shelter.id, shelter.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ShelterId) -> Result<Option<Shelter>, RepositoryError> {
        let state = self.state.read().unwrap();
        Ok(state.shelters.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Shelter>, RepositoryError> {
        let state = self.state.read().unwrap();
        let mut shelters: Vec<Shelter> = state.shelters.values().cloned().collect();
        shelters.sort_by_key(|shelter| shelter.created_at);
        Ok(shelters)
    }

    async fn delete(&self, id: ShelterId) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        state.shelters.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl AdoptionRequestRepository for InMemoryStore {
    async fn create(&self, request: &AdoptionRequest) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();
        state.requests.insert(request.id, request.clone());
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: AdoptionRequestId,
    ) -> Result<Option<AdoptionRequest>, RepositoryError> {
        let state = self.state.read().unwrap();
        Ok(state.requests.get(&id).cloned())
    }

    async fn list_by_requester(
        &self,
        requester: UserId,
    ) -> Result<Vec<AdoptionRequest>, RepositoryError> {
        let state = self.state.read().unwrap();
        let mut requests: Vec<AdoptionRequest> = state
            .requests
            .values()
            .filter(|request| request.requester_id == requester)
            .cloned()
            .collect();
        requests.sort_by_key(|request| request.created_at);
        Ok(requests)
    }

    async fn list_by_shelter_owner(
        &self,
        owner: UserId,
    ) -> Result<Vec<AdoptionRequest>, RepositoryError> {
        let state = self.state.read().unwrap();
        let mut requests: Vec<AdoptionRequest> = state
            .requests
            .values()
            .filter(|request| {
                state
                    .pets
                    .get(&request.pet_id)
                    .and_then(|pet| state.shelters.get(&pet.shelter_id))
                    .is_some_and(|shelter| shelter.owner_user_id == owner)
            })
            .cloned()
            .collect();
        requests.sort_by_key(|request| request.created_at);
        Ok(requests)
    }

    async fn list_all(&self) -> Result<Vec<AdoptionRequest>, RepositoryError> {
        let state = self.state.read().unwrap();
        let mut requests: Vec<AdoptionRequest> = state.requests.values().cloned().collect();
        requests.sort_by_key(|request| request.created_at);
        Ok(requests)
    }

    async fn resolve(
        &self,
        request: &AdoptionRequest,
        adopted_pet: Option<&Pet>,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap();

        // Compare-and-swap: the stored request must still be pending.
        let current = state.requests.get(&request.id).ok_or_else(|| {
            RepositoryError::NotFound(format!("adoption request {}", request.id.0))
        })?;
        if current.status != AdoptionStatus::Pending {
            return Err(RepositoryError::Conflict(
                "adoption request was concurrently resolved".to_string(),
            ));
        }

        if let Some(pet) = adopted_pet {
            if !state.pets.contains_key(&pet.id) {
                return Err(RepositoryError::NotFound(format!("pet {}", pet.id.0)));
            }
            state.pets.insert(pet.id, pet.clone());
        }
        state.requests.insert(request.id, request.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &User) -> Result<(), RepositoryError> {
        let mut users = self.users.write().unwrap();
        if users.values().any(|existing| existing.email == user.email) {
            return Err(RepositoryError::Conflict(format!(
                "email {} is already registered",
                user.email
            )));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().unwrap();
        Ok(users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let users = self.users.read().unwrap();
        Ok(users.values().find(|user| user.email == email).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::Role;

    fn seeded_store() -> (InMemoryStore, Shelter, Pet, AdoptionRequest) {
        let store = InMemoryStore::new();
        let shelter = Shelter::new("Happy Tails".to_string(), None, None, UserId::new());
        let pet = Pet::new(
            shelter.id,
            "Biscuit".to_string(),
            "dog".to_string(),
            None,
            Some(3),
            None,
        );
        let request = AdoptionRequest::new(UserId::new(), pet.id, None);
        {
            let mut state = store.state.write().unwrap();
            state.shelters.insert(shelter.id, shelter.clone());
            state.pets.insert(pet.id, pet.clone());
            state.requests.insert(request.id, request.clone());
        }
        (store, shelter, pet, request)
    }

    #[tokio::test]
    async fn resolve_commits_request_and_pet_together() {
        let (store, _, mut pet, mut request) = seeded_store();

        request.transition_to(AdoptionStatus::Approved).unwrap();
        pet.mark_adopted();
        store.resolve(&request, Some(&pet)).await.unwrap();

        let stored_request = AdoptionRequestRepository::find_by_id(&store, request.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored_request.status, AdoptionStatus::Approved);
        let stored_pet = PetRepository::find_by_id(&store, pet.id).await.unwrap().unwrap();
        assert_eq!(stored_pet.status, crate::domain::pet::PetStatus::Adopted);
    }

    #[tokio::test]
    async fn resolve_loses_race_with_conflict() {
        let (store, _, mut pet, request) = seeded_store();

        // Two actors both observed the pending request.
        let mut first = request.clone();
        let mut second = request.clone();

        first.transition_to(AdoptionStatus::Approved).unwrap();
        pet.mark_adopted();
        store.resolve(&first, Some(&pet)).await.unwrap();

        second.transition_to(AdoptionStatus::Rejected).unwrap();
        let err = store.resolve(&second, None).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));

        let stored = AdoptionRequestRepository::find_by_id(&store, request.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, AdoptionStatus::Approved);
    }

    #[tokio::test]
    async fn shelter_owner_listing_is_scoped() {
        let (store, shelter, _, request) = seeded_store();

        let mine = store
            .list_by_shelter_owner(shelter.owner_user_id)
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, request.id);

        let other = store.list_by_shelter_owner(UserId::new()).await.unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let repo = InMemoryUserRepository::new();
        let user = User::new(
            "Sam".to_string(),
            "sam@example.com".to_string(),
            "hash".to_string(),
            Role::User,
        );
        repo.create(&user).await.unwrap();

        let dup = User::new(
            "Other Sam".to_string(),
            "sam@example.com".to_string(),
            "hash".to_string(),
            Role::User,
        );
        let err = repo.create(&dup).await.unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }
}
