//! Operational settings singleton.

mod domain;
mod router;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

pub use domain::{SettingsPatch, SettingsRecord};
pub use router::settings_router;

use crate::error::ErrorKind;
use crate::store::RepositoryError;

pub trait SettingsRepository: Send + Sync {
    /// Returns the stored settings, persisting `defaults` first when none exist yet.
    fn get_or_create(&self, defaults: SettingsRecord) -> Result<SettingsRecord, RepositoryError>;
    /// Applies `edit` to the stored settings (or `defaults`) and persists the result under
    /// one lock.
    fn modify<E, F>(&self, defaults: SettingsRecord, edit: F) -> Result<SettingsRecord, E>
    where
        F: FnOnce(SettingsRecord) -> Result<SettingsRecord, E>,
        E: From<RepositoryError>;
}

pub struct SettingsService<S> {
    repository: Arc<S>,
}

impl<S> SettingsService<S>
where
    S: SettingsRepository + 'static,
{
    pub fn new(repository: Arc<S>) -> Self {
        Self { repository }
    }

    pub fn current(&self, now: DateTime<Utc>) -> Result<SettingsRecord, SettingsError> {
        Ok(self
            .repository
            .get_or_create(SettingsRecord::defaults(now))?)
    }

    pub fn update(
        &self,
        patch: SettingsPatch,
        now: DateTime<Utc>,
    ) -> Result<SettingsRecord, SettingsError> {
        if patch.is_empty() {
            return self.current(now);
        }

        let stored = self
            .repository
            .modify(SettingsRecord::defaults(now), |current| {
                patch.apply(current, now)
            })?;
        info!(
            max_applications_per_student = stored.max_applications_per_student,
            auto_approval_enabled = stored.auto_approval_enabled,
            deadline = ?stored.application_deadline,
            "settings updated"
        );
        Ok(stored)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl SettingsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SettingsError::Validation(_) => ErrorKind::Validation,
            SettingsError::Repository(err) => err.kind(),
        }
    }
}
