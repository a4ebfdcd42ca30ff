// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Bearer-token identity extraction.
//!
//! Verifies the `Authorization: Bearer <token>` header against the token
//! service and hands the resulting [`Identity`] to the handler. Handlers
//! that take an [`AuthIdentity`] are authenticated routes; everything else
//! is public.

use crate::domain::identity::{Identity, TokenService};
use crate::presentation::api::{ApiError, AppState};
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

pub struct AuthIdentity(pub Identity);

impl FromRequestParts<AppState> for AuthIdentity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("missing Authorization header"))?;

        let token = match header.split_once(' ') {
            Some((scheme, token)) if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() => {
                token
            }
            _ => return Err(ApiError::unauthorized("invalid Authorization header")),
        };

        let identity = state
            .tokens
            .verify(token)
            .map_err(|_| ApiError::unauthorized("invalid or expired token"))?;

        Ok(AuthIdentity(identity))
    }
}
