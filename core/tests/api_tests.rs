// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! HTTP surface tests: routing, identity extraction and the mapping from
//! the core error taxonomy onto status codes. The router is driven
//! directly with `tower::ServiceExt::oneshot`, no listener involved.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use rehome_core::application::account::StandardAccountService;
use rehome_core::application::adoption_service::StandardAdoptionService;
use rehome_core::application::catalog::{PetCatalogService, ShelterDirectoryService};
use rehome_core::domain::identity::TokenService;
use rehome_core::infrastructure::auth::JwtTokenService;
use rehome_core::infrastructure::event_queue::EventDispatcher;
use rehome_core::infrastructure::repositories::{InMemoryStore, InMemoryUserRepository};
use rehome_core::presentation::api::{app, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    let store = InMemoryStore::new();
    let users = Arc::new(InMemoryUserRepository::new());
    let tokens: Arc<dyn TokenService> =
        Arc::new(JwtTokenService::with_default_ttl("api-test-secret"));

    let pets = Arc::new(store.clone());
    let shelters = Arc::new(store.clone());
    let requests = Arc::new(store);

    app(AppState {
        adoptions: Arc::new(StandardAdoptionService::new(
            requests,
            pets.clone(),
            shelters.clone(),
            EventDispatcher::disconnected(),
        )),
        accounts: Arc::new(StandardAccountService::new(users, tokens.clone())),
        pets: Arc::new(PetCatalogService::new(pets, shelters.clone())),
        shelters: Arc::new(ShelterDirectoryService::new(shelters)),
        tokens,
    })
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Register a user with the given role and return `(token, user_id)`.
async fn register_and_login(app: &Router, email: &str, role: &str) -> (String, String) {
    let (status, body) = send(
        app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": "Test Person",
            "email": email,
            "password": "a-long-password",
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    let user_id = body["user"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": email, "password": "a-long-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    (body["token"].as_str().unwrap().to_string(), user_id)
}

#[tokio::test]
async fn health_is_public() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn register_does_not_leak_password_hash() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": "Kim",
            "email": "kim@example.com",
            "password": "long-enough",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["role"], "user");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let app = test_app();
    register_and_login(&app, "dup@example.com", "user").await;
    let (status, _) = send(
        &app,
        "POST",
        "/auth/register",
        None,
        Some(json!({
            "name": "Again",
            "email": "dup@example.com",
            "password": "a-long-password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let app = test_app();
    register_and_login(&app, "who@example.com", "user").await;
    let (status, _) = send(
        &app,
        "POST",
        "/auth/login",
        None,
        Some(json!({ "email": "who@example.com", "password": "wrong-password" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_require_a_valid_bearer_token() {
    let app = test_app();

    let (status, _) = send(&app, "GET", "/adoptions/my", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/adoptions/my", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn catalog_mutations_are_admin_only() {
    let app = test_app();
    let (user_token, user_id) = register_and_login(&app, "plain@example.com", "user").await;

    let (status, _) = send(
        &app,
        "POST",
        "/shelters",
        Some(&user_token),
        Some(json!({ "name": "Nope", "owner_user_id": user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn illegal_pet_status_filter_is_a_bad_request() {
    let app = test_app();
    let (status, _) = send(&app, "GET", "/pets?status=bogus", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn full_adoption_flow_over_http() {
    let app = test_app();
    let (admin_token, _) = register_and_login(&app, "admin@example.com", "admin").await;
    let (owner_token, owner_id) = register_and_login(&app, "owner@example.com", "shelter").await;
    let (user_token, _) = register_and_login(&app, "adopter@example.com", "user").await;

    // Admin sets up the shelter and a pet.
    let (status, body) = send(
        &app,
        "POST",
        "/shelters",
        Some(&admin_token),
        Some(json!({ "name": "Happy Tails", "owner_user_id": owner_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let shelter_id = body["shelter"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/pets",
        Some(&admin_token),
        Some(json!({
            "shelter_id": shelter_id,
            "name": "Biscuit",
            "species": "dog",
            "age": 3,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let pet_id = body["pet"]["id"].as_str().unwrap().to_string();

    // The adopter applies.
    let (status, body) = send(
        &app,
        "POST",
        &format!("/adoptions/{pet_id}/apply"),
        Some(&user_token),
        Some(json!({ "message": "we have a garden" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["adoption_request"]["status"], "pending");
    let request_id = body["adoption_request"]["id"].as_str().unwrap().to_string();

    // The adopter cannot approve their own request.
    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/adoptions/{request_id}/approve"),
        Some(&user_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The shelter owner sees it and approves it.
    let (status, body) = send(&app, "GET", "/adoptions/shelter", Some(&owner_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["adoption_requests"].as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/adoptions/{request_id}/approve"),
        Some(&owner_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["adoption_request"]["status"], "approved");

    // The pet is now adopted and a second application is refused.
    let (status, body) = send(&app, "GET", &format!("/pets/{pet_id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pet"]["status"], "adopted");

    let (status, _) = send(
        &app,
        "POST",
        &format!("/adoptions/{pet_id}/apply"),
        Some(&user_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Applying for a pet that does not exist is a 404.
    let missing = uuid::Uuid::new_v4();
    let (status, _) = send(
        &app,
        "POST",
        &format!("/adoptions/{missing}/apply"),
        Some(&user_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
