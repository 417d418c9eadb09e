use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use super::domain::{
    normalize_email, UserDraft, UserId, UserRecord, UserRole, UserStatus, UserView,
};
use super::repository::UserRepository;
use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::error::ErrorKind;
use crate::store::RepositoryError;

static USER_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_user_id() -> UserId {
    let id = USER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    UserId(format!("user-{id:05}"))
}

/// Account management: listing, creation with hashed credentials, and status changes.
pub struct UserService<R> {
    repository: Arc<R>,
}

impl<R> UserService<R>
where
    R: UserRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    pub fn list(&self) -> Result<Vec<UserView>, UserServiceError> {
        let users = self.repository.list()?;
        Ok(users.iter().map(UserRecord::view).collect())
    }

    pub fn create(
        &self,
        draft: UserDraft,
        now: DateTime<Utc>,
    ) -> Result<UserView, UserServiceError> {
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(UserServiceError::Validation("name is required".to_string()));
        }
        let email = normalize_email(&draft.email).ok_or_else(|| {
            UserServiceError::Validation(format!("'{}' is not a valid email address", draft.email))
        })?;
        validate_password_strength(&draft.password, MIN_PASSWORD_LENGTH)
            .map_err(UserServiceError::Validation)?;

        if self.repository.find_by_email(&email)?.is_some() {
            return Err(UserServiceError::DuplicateEmail(email));
        }

        let password_hash = hash_password(&draft.password)
            .map_err(|err| UserServiceError::Hashing(err.to_string()))?;

        let record = UserRecord {
            id: next_user_id(),
            name: name.to_string(),
            email: email.clone(),
            password_hash,
            role: draft.role,
            status: UserStatus::Active,
            joined_at: now,
        };

        let stored = self.repository.insert(record).map_err(|err| match err {
            RepositoryError::Conflict => UserServiceError::DuplicateEmail(email),
            other => UserServiceError::Repository(other),
        })?;
        info!(user_id = %stored.id, role = stored.role.label(), "user created");
        Ok(stored.view())
    }

    pub fn set_status(
        &self,
        user_id: &UserId,
        status: UserStatus,
    ) -> Result<UserView, UserServiceError> {
        let mut record = self
            .repository
            .fetch(user_id)?
            .ok_or_else(|| UserServiceError::NotFound(user_id.clone()))?;

        if record.status == status {
            return Ok(record.view());
        }

        let previous = record.status;
        record.status = status;
        let stored = self.repository.update(record)?;
        info!(
            user_id = %stored.id,
            from = previous.label(),
            to = stored.status.label(),
            "user status changed"
        );
        Ok(stored.view())
    }

    /// Make sure an active administrator with `email` exists, creating it when absent.
    ///
    /// An existing account is left untouched so restarts never reset a changed password.
    pub fn ensure_admin(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<UserView, UserServiceError> {
        let normalized = normalize_email(email).ok_or_else(|| {
            UserServiceError::Validation(format!("'{email}' is not a valid email address"))
        })?;
        if let Some(existing) = self.repository.find_by_email(&normalized)? {
            return Ok(existing.view());
        }

        self.create(
            UserDraft {
                name: "Administrator".to_string(),
                email: normalized,
                password: password.to_string(),
                role: UserRole::Admin,
            },
            now,
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UserServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("a user with email {0} already exists")]
    DuplicateEmail(String),
    #[error("user {0} not found")]
    NotFound(UserId),
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl UserServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            UserServiceError::Validation(_) => ErrorKind::Validation,
            UserServiceError::DuplicateEmail(_) => ErrorKind::Conflict,
            UserServiceError::NotFound(_) => ErrorKind::NotFound,
            UserServiceError::Hashing(_) => ErrorKind::Internal,
            UserServiceError::Repository(err) => err.kind(),
        }
    }
}
