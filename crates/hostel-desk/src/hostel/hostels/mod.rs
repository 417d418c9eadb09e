//! Hostel records and occupancy accounting.

mod domain;
pub mod occupancy;
mod router;
mod service;

pub use domain::{HostelCategory, HostelDraft, HostelId, HostelPatch, HostelRecord};
pub use occupancy::{occupancy_snapshot, OccupancyEntry, OccupancyViolation};
pub use router::hostel_router;
pub use service::HostelService;
pub(crate) use service::ensure_consistent;

use crate::error::ErrorKind;
use crate::store::RepositoryError;

pub trait HostelRepository: Send + Sync {
    fn insert(&self, record: HostelRecord) -> Result<HostelRecord, RepositoryError>;
    /// Fails with `Conflict` when another hostel already carries the name.
    fn update(&self, record: HostelRecord) -> Result<HostelRecord, RepositoryError>;
    fn fetch(&self, id: &HostelId) -> Result<Option<HostelRecord>, RepositoryError>;
    /// Case-insensitive lookup on the trimmed name.
    fn find_by_name(&self, name: &str) -> Result<Option<HostelRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<HostelRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HostelError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Occupancy(#[from] OccupancyViolation),
    /// A stored record failed the occupancy invariant on read.
    #[error("stored hostel data is inconsistent: {0}")]
    Corrupt(OccupancyViolation),
    #[error("a hostel named '{0}' already exists")]
    DuplicateName(String),
    #[error("hostel {0} not found")]
    NotFound(HostelId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl HostelError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HostelError::Validation(_) | HostelError::Occupancy(_) => ErrorKind::Validation,
            HostelError::Corrupt(_) => ErrorKind::Store,
            HostelError::DuplicateName(_) => ErrorKind::Conflict,
            HostelError::NotFound(_) => ErrorKind::NotFound,
            HostelError::Repository(err) => err.kind(),
        }
    }
}
