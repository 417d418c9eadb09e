use super::domain::{UserId, UserRecord};
use crate::store::RepositoryError;

/// Account storage. Implementations must reject a second account with the same email.
pub trait UserRepository: Send + Sync {
    fn insert(&self, record: UserRecord) -> Result<UserRecord, RepositoryError>;
    fn update(&self, record: UserRecord) -> Result<UserRecord, RepositoryError>;
    fn fetch(&self, id: &UserId) -> Result<Option<UserRecord>, RepositoryError>;
    /// Lookup by already-normalized email.
    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<UserRecord>, RepositoryError>;
}
