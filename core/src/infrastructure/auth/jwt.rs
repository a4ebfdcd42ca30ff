// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0

use crate::domain::identity::{Identity, TokenError, TokenService};
use crate::domain::user::{Role, UserId};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
struct UserClaims {
    sub: Uuid,
    role: Role,
    iat: i64,
    exp: i64,
}

/// HS256 bearer tokens carrying the caller's id and role.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Tokens valid for 24 hours.
    pub fn with_default_ttl(secret: &str) -> Self {
        Self::new(secret, Duration::hours(24))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, identity: &Identity) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = UserClaims {
            sub: identity.user_id.0,
            role: identity.role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Issuance(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Identity, TokenError> {
        let data = decode::<UserClaims>(token, &self.decoding_key, &Validation::default())
            .map_err(|_| TokenError::Invalid)?;

        Ok(Identity::new(UserId(data.claims.sub), data.claims.role))
    }
}
