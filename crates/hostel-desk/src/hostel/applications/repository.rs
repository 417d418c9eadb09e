use super::domain::{ApplicationId, ApplicationRecord, ApplicationStatus};
use super::status::StatusChange;
use crate::store::RepositoryError;

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Listing preserves insertion order; the aggregation folds rely on it for tie-breaks.
pub trait ApplicationRepository: Send + Sync {
    /// Stores `record` once `admit` accepts the current collection. Both steps run under the
    /// same write lock, so admission rules see every committed submission.
    fn insert_checked<E, F>(
        &self,
        record: ApplicationRecord,
        admit: F,
    ) -> Result<ApplicationRecord, E>
    where
        F: FnOnce(&[ApplicationRecord]) -> Result<(), E>,
        E: From<RepositoryError>;

    /// Runs `decide` against the stored record and persists an applied change before the
    /// record can be observed by another writer. Fails with `NotFound` when the id is absent.
    fn apply_change<E, F>(&self, id: &ApplicationId, decide: F) -> Result<StatusChange, E>
    where
        F: FnOnce(&ApplicationRecord) -> Result<StatusChange, E>,
        E: From<RepositoryError>;

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn list(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError>;
}
