use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::jwt::TokenAuthority;
use super::password::verify_password;
use super::AuthError;
use crate::hostel::users::{
    normalize_email, UserId, UserRecord, UserRepository, UserStatus, UserView,
};

#[derive(Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserView,
}

/// Credential check plus token issuance.
pub struct AuthService<R> {
    users: Arc<R>,
    authority: Arc<TokenAuthority>,
}

impl<R> AuthService<R>
where
    R: UserRepository + 'static,
{
    pub fn new(users: Arc<R>, authority: Arc<TokenAuthority>) -> Self {
        Self { users, authority }
    }

    pub fn authority(&self) -> Arc<TokenAuthority> {
        Arc::clone(&self.authority)
    }

    /// Resolve an active account whose stored hash matches `secret`.
    pub fn verify_credentials(&self, email: &str, secret: &str) -> Result<UserRecord, AuthError> {
        let email = normalize_email(email).ok_or(AuthError::InvalidCredentials)?;
        let user = self
            .users
            .find_by_email(&email)?
            .ok_or(AuthError::InvalidCredentials)?;

        let matches = verify_password(secret, &user.password_hash)
            .map_err(|err| AuthError::Hashing(err.to_string()))?;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        if user.status != UserStatus::Active {
            return Err(AuthError::AccountDisabled(user.status));
        }

        Ok(user)
    }

    pub fn login(
        &self,
        request: LoginRequest,
        now: DateTime<Utc>,
    ) -> Result<LoginResponse, AuthError> {
        let user = match self.verify_credentials(&request.email, &request.password) {
            Ok(user) => user,
            Err(err) => {
                warn!(email = %request.email.trim(), error = %err, "login refused");
                return Err(err);
            }
        };

        let issued = self.authority.issue(&user, now)?;
        info!(user_id = %user.id, role = user.role.label(), "login succeeded");
        Ok(LoginResponse {
            token: issued.token,
            expires_at: issued.expires_at,
            user: user.view(),
        })
    }

    /// Current view of the account behind a verified token.
    pub fn profile(&self, user_id: &UserId) -> Result<UserView, AuthError> {
        self.users
            .fetch(user_id)?
            .map(|user| user.view())
            .ok_or(AuthError::UnknownAccount)
    }
}
