// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! HTTP surface of the platform.
//!
//! Handlers stay thin: decode the request, resolve the caller's identity,
//! delegate to an application service, map the typed error onto a status
//! code. All authorization happens inside the services.

use crate::application::account::{AccountError, AccountService, RegisterInput};
use crate::application::adoption::AdoptionService;
use crate::application::catalog::{
    NewPet, NewShelter, PetCatalogService, PetUpdate, ShelterDirectoryService, ShelterUpdate,
};
use crate::domain::adoption::AdoptionRequestId;
use crate::domain::error::CoreError;
use crate::domain::identity::TokenService;
use crate::domain::pet::{PetId, PetStatus};
use crate::domain::repository::PetFilter;
use crate::domain::shelter::ShelterId;
use crate::domain::user::{Role, UserId};
use crate::presentation::auth::AuthIdentity;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState {
    pub adoptions: Arc<dyn AdoptionService>,
    pub accounts: Arc<dyn AccountService>,
    pub pets: Arc<PetCatalogService>,
    pub shelters: Arc<ShelterDirectoryService>,
    pub tokens: Arc<dyn TokenService>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/pets", get(list_pets).post(create_pet))
        .route("/pets/{id}", get(get_pet).put(update_pet).delete(delete_pet))
        .route("/shelters", get(list_shelters).post(create_shelter))
        .route(
            "/shelters/{id}",
            get(get_shelter).put(update_shelter).delete(delete_shelter),
        )
        .route("/adoptions/{id}/apply", post(apply_for_adoption))
        .route("/adoptions/my", get(my_adoptions))
        .route("/adoptions/shelter", get(shelter_adoptions))
        .route("/adoptions/{id}/approve", patch(approve_adoption))
        .route("/adoptions/{id}/reject", patch(reject_adoption))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Transport-level error: a status code and a JSON `{"error": ...}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn unauthorized(message: &str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.to_string(),
        }
    }

    fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let status = match err {
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::InvalidState(_) => StatusCode::BAD_REQUEST,
            CoreError::Forbidden(_) => StatusCode::FORBIDDEN,
            CoreError::Conflict(_) => StatusCode::CONFLICT,
            CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        let status = match err {
            AccountError::Validation(_) => StatusCode::BAD_REQUEST,
            AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AccountError::EmailTaken => StatusCode::CONFLICT,
            AccountError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RegisterRequest {
    name: String,
    email: String,
    password: String,
    role: Option<Role>,
}

async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    let user = state
        .accounts
        .register(RegisterInput {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            role: payload.role,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "user": user }))).into_response())
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let (token, user) = state.accounts.login(&payload.email, &payload.password).await?;
    Ok(Json(json!({ "token": token, "user": user })).into_response())
}

// ---------------------------------------------------------------------------
// Pets
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct PetListQuery {
    status: Option<String>,
    species: Option<String>,
}

fn parse_pet_status(s: &str) -> Result<PetStatus, ApiError> {
    PetStatus::parse(s).ok_or_else(|| ApiError::bad_request(format!("illegal pet status '{s}'")))
}

async fn list_pets(
    State(state): State<AppState>,
    Query(query): Query<PetListQuery>,
) -> Result<Response, ApiError> {
    let filter = PetFilter {
        status: query.status.as_deref().map(parse_pet_status).transpose()?,
        species: query.species,
    };
    let pets = state.pets.list(&filter).await?;
    Ok(Json(json!({ "pets": pets })).into_response())
}

async fn get_pet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let pet = state.pets.get(PetId(id)).await?;
    Ok(Json(json!({ "pet": pet })).into_response())
}

#[derive(Deserialize)]
struct CreatePetRequest {
    shelter_id: Uuid,
    name: String,
    species: String,
    breed: Option<String>,
    age: Option<i32>,
    description: Option<String>,
}

async fn create_pet(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
    Json(payload): Json<CreatePetRequest>,
) -> Result<Response, ApiError> {
    let pet = state
        .pets
        .create(
            &identity,
            NewPet {
                shelter_id: ShelterId(payload.shelter_id),
                name: payload.name,
                species: payload.species,
                breed: payload.breed,
                age: payload.age,
                description: payload.description,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "pet": pet }))).into_response())
}

#[derive(Deserialize)]
struct UpdatePetRequest {
    name: Option<String>,
    species: Option<String>,
    breed: Option<String>,
    age: Option<i32>,
    description: Option<String>,
    status: Option<String>,
}

async fn update_pet(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePetRequest>,
) -> Result<Response, ApiError> {
    let update = PetUpdate {
        name: payload.name,
        species: payload.species,
        breed: payload.breed,
        age: payload.age,
        description: payload.description,
        status: payload.status.as_deref().map(parse_pet_status).transpose()?,
    };
    let pet = state.pets.update(&identity, PetId(id), update).await?;
    Ok(Json(json!({ "pet": pet })).into_response())
}

async fn delete_pet(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    state.pets.delete(&identity, PetId(id)).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

// ---------------------------------------------------------------------------
// Shelters
// ---------------------------------------------------------------------------

async fn list_shelters(State(state): State<AppState>) -> Result<Response, ApiError> {
    let shelters = state.shelters.list().await?;
    Ok(Json(json!({ "shelters": shelters })).into_response())
}

async fn get_shelter(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let shelter = state.shelters.get(ShelterId(id)).await?;
    Ok(Json(json!({ "shelter": shelter })).into_response())
}

#[derive(Deserialize)]
struct CreateShelterRequest {
    name: String,
    address: Option<String>,
    phone: Option<String>,
    owner_user_id: Uuid,
}

async fn create_shelter(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
    Json(payload): Json<CreateShelterRequest>,
) -> Result<Response, ApiError> {
    let shelter = state
        .shelters
        .create(
            &identity,
            NewShelter {
                name: payload.name,
                address: payload.address,
                phone: payload.phone,
                owner_user_id: UserId(payload.owner_user_id),
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "shelter": shelter }))).into_response())
}

#[derive(Deserialize)]
struct UpdateShelterRequest {
    name: Option<String>,
    address: Option<String>,
    phone: Option<String>,
}

async fn update_shelter(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateShelterRequest>,
) -> Result<Response, ApiError> {
    let update = ShelterUpdate {
        name: payload.name,
        address: payload.address,
        phone: payload.phone,
    };
    let shelter = state.shelters.update(&identity, ShelterId(id), update).await?;
    Ok(Json(json!({ "shelter": shelter })).into_response())
}

async fn delete_shelter(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    state.shelters.delete(&identity, ShelterId(id)).await?;
    Ok(Json(json!({ "message": "shelter deleted successfully" })).into_response())
}

// ---------------------------------------------------------------------------
// Adoptions
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ApplyRequest {
    message: Option<String>,
}

async fn apply_for_adoption(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
    Path(pet_id): Path<Uuid>,
    body: axum::body::Bytes,
) -> Result<Response, ApiError> {
    // The message body is optional and lenient: a missing or unparseable
    // body just means no message.
    let message = serde_json::from_slice::<ApplyRequest>(&body)
        .ok()
        .and_then(|payload| payload.message);
    let request = state
        .adoptions
        .apply(&identity, PetId(pet_id), message)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "adoption_request": request }))).into_response())
}

async fn my_adoptions(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
) -> Result<Response, ApiError> {
    let requests = state.adoptions.list_own(&identity).await?;
    Ok(Json(json!({ "adoption_requests": requests })).into_response())
}

async fn shelter_adoptions(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
) -> Result<Response, ApiError> {
    let requests = state.adoptions.list_for_shelter(&identity).await?;
    Ok(Json(json!({ "adoption_requests": requests })).into_response())
}

async fn approve_adoption(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let request = state
        .adoptions
        .approve(&identity, AdoptionRequestId(id))
        .await?;
    Ok(Json(json!({ "adoption_request": request })).into_response())
}

async fn reject_adoption(
    State(state): State<AppState>,
    AuthIdentity(identity): AuthIdentity,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let request = state
        .adoptions
        .reject(&identity, AdoptionRequestId(id))
        .await?;
    Ok(Json(json!({ "adoption_request": request })).into_response())
}
