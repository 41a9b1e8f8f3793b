//! # User service
//!
//! Registration, login, profile lookup, and logout over the [`UserStore`]
//! and [`SessionStore`] traits. Registration validates its required fields
//! here, before persistence and independent of the storage backend; the
//! store only enforces email uniqueness.
//!
//! [`UserInfo`] is the client-safe projection of a stored user — it omits
//! the password hash, which never leaves this module.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use store::{NewUser, SessionStore, StoreError, User, UserStore};

use crate::auth;
use crate::error::DomainError;

/// Minimum accepted password length, in bytes.
const MIN_PASSWORD_LEN: usize = 8;

/// Profile fields safe to send to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// Successful register/login outcome: the profile plus a fresh bearer token.
#[derive(Debug, Clone)]
pub struct AuthGrant {
    pub user: UserInfo,
    pub token: String,
}

/// Registration, login, and session management.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { users, sessions }
    }

    /// Register a new account and sign it in.
    ///
    /// Fails with `Validation` (listing every offending field) before any
    /// store access, and with `EmailTaken` when the email is already
    /// registered. Email matching is exact — addresses are stored as given.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthGrant, DomainError> {
        let name = name.trim();
        let email = email.trim();

        let mut errors = BTreeMap::new();
        if name.is_empty() {
            errors.insert("name".to_string(), "Name is required".to_string());
        }
        if email.is_empty() || !email.contains('@') {
            errors.insert("email".to_string(), "Invalid email address".to_string());
        }
        if password.len() < MIN_PASSWORD_LEN {
            errors.insert(
                "password".to_string(),
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            );
        }
        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        let password_hash = auth::hash_password(password)?;
        let user = self
            .users
            .create_user(NewUser {
                name: name.to_string(),
                email: email.to_string(),
                password_hash,
            })
            .await
            .map_err(|e| match e {
                StoreError::DuplicateEmail => DomainError::EmailTaken,
                other => DomainError::Storage(other),
            })?;

        self.grant(&user).await
    }

    /// Exchange email + password for a bearer token. Unknown email and wrong
    /// password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthGrant, DomainError> {
        let user = self
            .users
            .find_user_by_email(email.trim())
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !auth::verify_password(password, &user.password_hash)? {
            return Err(DomainError::InvalidCredentials);
        }

        self.grant(&user).await
    }

    /// Profile for an authenticated user id.
    pub async fn me(&self, requester: Uuid) -> Result<UserInfo, DomainError> {
        let user = self
            .users
            .find_user(requester)
            .await?
            .ok_or(DomainError::NotFound)?;
        Ok(UserInfo::from(&user))
    }

    /// Revoke a bearer token. Revoking an unknown token is a no-op.
    pub async fn logout(&self, token: &str) -> Result<(), DomainError> {
        self.sessions.revoke(token).await?;
        Ok(())
    }

    async fn grant(&self, user: &User) -> Result<AuthGrant, DomainError> {
        let token = auth::issue_token(self.sessions.as_ref(), user.id).await?;
        Ok(AuthGrant {
            user: UserInfo::from(user),
            token,
        })
    }
}
