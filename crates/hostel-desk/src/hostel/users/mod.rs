//! Accounts: staff and student users with hashed credentials.

mod domain;
mod repository;
mod router;
mod service;

pub use domain::{
    normalize_email, UserDraft, UserId, UserRecord, UserRole, UserStatus, UserView,
};
pub use repository::UserRepository;
pub use router::user_router;
pub use service::{UserService, UserServiceError};
