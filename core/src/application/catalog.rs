// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Pet catalog and shelter directory.
//!
//! Thin CRUD over the repositories. Reads are public; every mutation gates
//! on the admin policy before touching storage.

use crate::domain::error::CoreError;
use crate::domain::identity::Identity;
use crate::domain::pet::{Pet, PetId, PetStatus};
use crate::domain::policy;
use crate::domain::repository::{PetFilter, PetRepository, ShelterRepository};
use crate::domain::shelter::{Shelter, ShelterId};
use crate::domain::user::UserId;
use chrono::Utc;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct NewPet {
    pub shelter_id: ShelterId,
    pub name: String,
    pub species: String,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub description: Option<String>,
}

/// Partial update; absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct PetUpdate {
    pub name: Option<String>,
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<i32>,
    pub description: Option<String>,
    pub status: Option<PetStatus>,
}

pub struct PetCatalogService {
    pets: Arc<dyn PetRepository>,
    shelters: Arc<dyn ShelterRepository>,
}

impl PetCatalogService {
    pub fn new(pets: Arc<dyn PetRepository>, shelters: Arc<dyn ShelterRepository>) -> Self {
        Self { pets, shelters }
    }

    pub async fn list(&self, filter: &PetFilter) -> Result<Vec<Pet>, CoreError> {
        Ok(self.pets.list(filter).await?)
    }

    pub async fn get(&self, id: PetId) -> Result<Pet, CoreError> {
        self.pets
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("pet {}", id.0)))
    }

    pub async fn create(&self, identity: &Identity, new_pet: NewPet) -> Result<Pet, CoreError> {
        policy::can_manage_catalog(identity).require()?;

        // The catalog only lists pets of known shelters.
        self.shelters
            .find_by_id(new_pet.shelter_id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("shelter {}", new_pet.shelter_id.0)))?;

        let pet = Pet::new(
            new_pet.shelter_id,
            new_pet.name,
            new_pet.species,
            new_pet.breed,
            new_pet.age,
            new_pet.description,
        );
        self.pets.save(&pet).await?;
        debug!(pet_id = ?pet.id, "pet added to catalog");
        Ok(pet)
    }

    pub async fn update(
        &self,
        identity: &Identity,
        id: PetId,
        update: PetUpdate,
    ) -> Result<Pet, CoreError> {
        policy::can_manage_catalog(identity).require()?;

        let mut pet = self.get(id).await?;
        if let Some(name) = update.name {
            pet.name = name;
        }
        if let Some(species) = update.species {
            pet.species = species;
        }
        if update.breed.is_some() {
            pet.breed = update.breed;
        }
        if update.age.is_some() {
            pet.age = update.age;
        }
        if update.description.is_some() {
            pet.description = update.description;
        }
        if let Some(status) = update.status {
            pet.status = status;
        }
        pet.updated_at = Utc::now();

        self.pets.save(&pet).await?;
        Ok(pet)
    }

    pub async fn delete(&self, identity: &Identity, id: PetId) -> Result<(), CoreError> {
        policy::can_manage_catalog(identity).require()?;
        self.pets.delete(id).await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewShelter {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub owner_user_id: UserId,
}

#[derive(Debug, Clone, Default)]
pub struct ShelterUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

pub struct ShelterDirectoryService {
    shelters: Arc<dyn ShelterRepository>,
}

impl ShelterDirectoryService {
    pub fn new(shelters: Arc<dyn ShelterRepository>) -> Self {
        Self { shelters }
    }

    pub async fn list(&self) -> Result<Vec<Shelter>, CoreError> {
        Ok(self.shelters.list_all().await?)
    }

    pub async fn get(&self, id: ShelterId) -> Result<Shelter, CoreError> {
        self.shelters
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::NotFound(format!("shelter {}", id.0)))
    }

    pub async fn create(
        &self,
        identity: &Identity,
        new_shelter: NewShelter,
    ) -> Result<Shelter, CoreError> {
        policy::can_manage_catalog(identity).require()?;

        let shelter = Shelter::new(
            new_shelter.name,
            new_shelter.address,
            new_shelter.phone,
            new_shelter.owner_user_id,
        );
        self.shelters.save(&shelter).await?;
        debug!(shelter_id = ?shelter.id, "shelter registered");
        Ok(shelter)
    }

    pub async fn update(
        &self,
        identity: &Identity,
        id: ShelterId,
        update: ShelterUpdate,
    ) -> Result<Shelter, CoreError> {
        policy::can_manage_catalog(identity).require()?;

        let mut shelter = self.get(id).await?;
        if let Some(name) = update.name {
            shelter.name = name;
        }
        if update.address.is_some() {
            shelter.address = update.address;
        }
        if update.phone.is_some() {
            shelter.phone = update.phone;
        }
        shelter.updated_at = Utc::now();

        self.shelters.save(&shelter).await?;
        Ok(shelter)
    }

    pub async fn delete(&self, identity: &Identity, id: ShelterId) -> Result<(), CoreError> {
        policy::can_manage_catalog(identity).require()?;
        self.shelters.delete(id).await?;
        Ok(())
    }
}
