use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::domain::{ApplicationDraft, ApplicationId, ApplicationRecord, ApplicationStatus};
use super::intake::{self, IntakeViolation};
use super::repository::ApplicationRepository;
use super::status::{self, StatusChange, StatusError};
use crate::error::ErrorKind;
use crate::hostel::settings::{SettingsRecord, SettingsRepository};
use crate::store::RepositoryError;

/// Reviewer identity stamped on applications approved by the auto-approval toggle.
pub const AUTO_APPROVAL_REVIEWER: &str = "system:auto-approval";

/// Service composing intake validation, the review state machine, and the record store.
pub struct ApplicationService<R, S> {
    repository: Arc<R>,
    settings: Arc<S>,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<R, S> ApplicationService<R, S>
where
    R: ApplicationRepository + 'static,
    S: SettingsRepository + 'static,
{
    pub fn new(repository: Arc<R>, settings: Arc<S>) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Submit a new application. It starts out pending unless auto-approval is switched on.
    pub fn submit(
        &self,
        draft: ApplicationDraft,
        now: DateTime<Utc>,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let draft = intake::sanitize(draft)?;
        let settings = self
            .settings
            .get_or_create(SettingsRecord::defaults(now))?;

        intake::check_window(&settings, now)?;

        let record = ApplicationRecord::from_draft(next_application_id(), draft, now);
        let record = if settings.auto_approval_enabled {
            status::transition(&record, ApplicationStatus::Approved, AUTO_APPROVAL_REVIEWER, now)?
                .into_record()
        } else {
            record
        };

        let limit = settings.max_applications_per_student;
        let student_id = record.student_id.clone();
        let stored = self.repository.insert_checked(record, |stored| {
            let existing = stored
                .iter()
                .filter(|record| record.student_id == student_id)
                .count();
            intake::check_limit(&student_id, existing, limit)
                .map_err(ApplicationServiceError::from)
        })?;
        info!(
            application_id = %stored.id,
            student_id = %stored.student_id,
            status = stored.status.label(),
            "application submitted"
        );
        Ok(stored)
    }

    /// List applications in submission order, optionally narrowed to one status.
    pub fn list(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<ApplicationRecord>, ApplicationServiceError> {
        Ok(self.repository.list(status)?)
    }

    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        self.repository
            .fetch(application_id)?
            .ok_or_else(|| ApplicationServiceError::NotFound(application_id.clone()))
    }

    /// Apply a review decision, stamping `reviewer` when the record leaves `pending`.
    pub fn set_status(
        &self,
        application_id: &ApplicationId,
        target: ApplicationStatus,
        reviewer: &str,
        now: DateTime<Utc>,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let mut previous = None;
        let change = self
            .repository
            .apply_change(application_id, |current| {
                previous = Some(current.status);
                status::transition(current, target, reviewer, now)
                    .map_err(ApplicationServiceError::from)
            })
            .map_err(|err| match err {
                ApplicationServiceError::Repository(RepositoryError::NotFound) => {
                    ApplicationServiceError::NotFound(application_id.clone())
                }
                other => other,
            })?;

        match change {
            StatusChange::Unchanged(record) => {
                debug!(
                    application_id = %record.id,
                    status = record.status.label(),
                    "status unchanged"
                );
                Ok(record)
            }
            StatusChange::Applied(record) => {
                info!(
                    application_id = %record.id,
                    from = previous.map(ApplicationStatus::label).unwrap_or_default(),
                    to = record.status.label(),
                    reviewer = record.reviewed_by.as_deref().unwrap_or_default(),
                    "application reviewed"
                );
                Ok(record)
            }
        }
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Intake(#[from] IntakeViolation),
    #[error(transparent)]
    Status(#[from] StatusError),
    #[error("application {0} not found")]
    NotFound(ApplicationId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ApplicationServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApplicationServiceError::Intake(violation) if violation.is_conflict() => {
                ErrorKind::Conflict
            }
            ApplicationServiceError::Intake(_) => ErrorKind::Validation,
            ApplicationServiceError::Status(StatusError::Terminal { .. }) => {
                ErrorKind::InvalidState
            }
            ApplicationServiceError::Status(StatusError::MissingReviewer) => {
                ErrorKind::Validation
            }
            ApplicationServiceError::NotFound(_) => ErrorKind::NotFound,
            ApplicationServiceError::Repository(err) => err.kind(),
        }
    }
}
