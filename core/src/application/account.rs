// Copyright (c) 2026 Rehome Contributors
// SPDX-License-Identifier: AGPL-3.0
//! Account flows: validating registration and login.
//!
//! Unknown email and wrong password are deliberately indistinguishable to
//! the caller.

use crate::domain::identity::{Identity, TokenService};
use crate::domain::repository::{RepositoryError, UserRepository};
use crate::domain::user::{Role, User};
use crate::infrastructure::auth::password;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("{0}")]
    Validation(String),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("email is already registered")]
    EmailTaken,

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AccountError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(_) => AccountError::EmailTaken,
            other => AccountError::Internal(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to [`Role::User`] when absent.
    pub role: Option<Role>,
}

#[async_trait]
pub trait AccountService: Send + Sync {
    async fn register(&self, input: RegisterInput) -> Result<User, AccountError>;

    /// Verify credentials and issue a bearer token for the session.
    async fn login(&self, email: &str, password: &str) -> Result<(String, User), AccountError>;
}

pub struct StandardAccountService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<dyn TokenService>,
}

impl StandardAccountService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<dyn TokenService>) -> Self {
        Self { users, tokens }
    }
}

fn validate(input: &RegisterInput) -> Result<(), AccountError> {
    if input.name.trim().is_empty() {
        return Err(AccountError::Validation("name must not be empty".to_string()));
    }
    let email = input.email.trim();
    let valid_email = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid_email {
        return Err(AccountError::Validation(format!("invalid email '{email}'")));
    }
    if input.password.len() < MIN_PASSWORD_LEN {
        return Err(AccountError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[async_trait]
impl AccountService for StandardAccountService {
    async fn register(&self, input: RegisterInput) -> Result<User, AccountError> {
        validate(&input)?;

        let hash = password::hash_password(&input.password)
            .map_err(|e| AccountError::Internal(e.to_string()))?;
        let user = User::new(
            input.name.trim().to_string(),
            input.email.trim().to_string(),
            hash,
            input.role.unwrap_or(Role::User),
        );

        self.users.create(&user).await?;
        debug!(user_id = ?user.id, role = %user.role, "user registered");
        Ok(user)
    }

    async fn login(&self, email: &str, password_input: &str) -> Result<(String, User), AccountError> {
        let user = self
            .users
            .find_by_email(email.trim())
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        if !password::verify_password(password_input, &user.password_hash) {
            return Err(AccountError::InvalidCredentials);
        }

        let token = self
            .tokens
            .issue(&Identity::new(user.id, user.role))
            .map_err(|e| AccountError::Internal(e.to_string()))?;

        debug!(user_id = ?user.id, "user logged in");
        Ok((token, user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::auth::JwtTokenService;
    use crate::infrastructure::repositories::InMemoryUserRepository;

    fn service() -> StandardAccountService {
        StandardAccountService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(JwtTokenService::with_default_ttl("test-secret")),
        )
    }

    fn input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            name: "Alex".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: None,
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let service = service();
        let user = service
            .register(input("alex@example.com", "sufficiently-long"))
            .await
            .unwrap();
        assert_eq!(user.role, Role::User);
        assert_ne!(user.password_hash, "sufficiently-long");

        let (token, logged_in) = service
            .login("alex@example.com", "sufficiently-long")
            .await
            .unwrap();
        assert!(!token.is_empty());
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn rejects_bad_email_and_short_password() {
        let service = service();
        assert!(matches!(
            service.register(input("not-an-email", "longenough")).await,
            Err(AccountError::Validation(_))
        ));
        assert!(matches!(
            service.register(input("a@b.example", "short")).await,
            Err(AccountError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let service = service();
        service
            .register(input("taken@example.com", "password1"))
            .await
            .unwrap();
        assert!(matches!(
            service.register(input("taken@example.com", "password2")).await,
            Err(AccountError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_look_alike() {
        let service = service();
        service
            .register(input("known@example.com", "password1"))
            .await
            .unwrap();

        let unknown = service.login("unknown@example.com", "password1").await;
        let wrong = service.login("known@example.com", "password2").await;
        assert!(matches!(unknown, Err(AccountError::InvalidCredentials)));
        assert!(matches!(wrong, Err(AccountError::InvalidCredentials)));
    }
}
