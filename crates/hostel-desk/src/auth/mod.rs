//! Access gateway: credential checks, session tokens, and role-aware request extractors.
//!
//! Routers that use [`AuthUser`], [`StaffUser`], or [`AdminUser`] expect an
//! `Extension<Arc<TokenAuthority>>` layer on the composed application.

mod extract;
pub mod jwt;
pub mod password;
mod router;
mod service;

pub use extract::{AdminUser, AuthUser, StaffUser};
pub use jwt::{Claims, IssuedToken, TokenAuthority};
pub use router::auth_router;
pub use service::{AuthService, LoginRequest, LoginResponse};

use crate::error::ErrorKind;
use crate::hostel::users::UserStatus;
use crate::store::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("account is {0}")]
    AccountDisabled(UserStatus),
    #[error("missing Authorization header")]
    MissingToken,
    #[error("invalid Authorization format, expected: Bearer <token>")]
    MalformedHeader,
    #[error("invalid or expired token")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),
    #[error("this action requires the {required} role")]
    Forbidden { required: &'static str },
    #[error("failed to sign session token")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("password verification failed: {0}")]
    Hashing(String),
    #[error("account no longer exists")]
    UnknownAccount,
    #[error("token authority missing from request extensions")]
    Unconfigured,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::MalformedHeader
            | AuthError::InvalidToken(_)
            | AuthError::UnknownAccount => ErrorKind::Unauthorized,
            AuthError::AccountDisabled(_) | AuthError::Forbidden { .. } => ErrorKind::Forbidden,
            AuthError::Signing(_) | AuthError::Hashing(_) | AuthError::Unconfigured => {
                ErrorKind::Internal
            }
            AuthError::Repository(err) => err.kind(),
        }
    }
}
