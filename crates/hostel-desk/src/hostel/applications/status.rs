use chrono::{DateTime, Utc};

use super::domain::{ApplicationId, ApplicationRecord, ApplicationStatus};

/// Rejections raised while reviewing an application.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    #[error("application {id} is already {from} and cannot move to {to}")]
    Terminal {
        id: ApplicationId,
        from: ApplicationStatus,
        to: ApplicationStatus,
    },
    #[error("a reviewer identity is required to change an application's status")]
    MissingReviewer,
}

/// Result of applying a review decision to a stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusChange {
    /// The record already carries the requested status; nothing to persist.
    Unchanged(ApplicationRecord),
    Applied(ApplicationRecord),
}

impl StatusChange {
    pub fn into_record(self) -> ApplicationRecord {
        match self {
            StatusChange::Unchanged(record) | StatusChange::Applied(record) => record,
        }
    }
}

/// Decides the outcome of moving `record` to `target`.
///
/// Re-requesting the current status is a no-op that keeps the original reviewer. Leaving
/// `pending` stamps the reviewer and review time; approved and rejected are terminal.
pub fn transition(
    record: &ApplicationRecord,
    target: ApplicationStatus,
    reviewer: &str,
    at: DateTime<Utc>,
) -> Result<StatusChange, StatusError> {
    let reviewer = reviewer.trim();
    if reviewer.is_empty() {
        return Err(StatusError::MissingReviewer);
    }

    if record.status == target {
        return Ok(StatusChange::Unchanged(record.clone()));
    }

    if record.status.is_terminal() {
        return Err(StatusError::Terminal {
            id: record.id.clone(),
            from: record.status,
            to: target,
        });
    }

    let mut updated = record.clone();
    updated.status = target;
    updated.reviewed_by = Some(reviewer.to_string());
    updated.reviewed_at = Some(at);
    Ok(StatusChange::Applied(updated))
}
