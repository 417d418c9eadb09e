use chrono::{DateTime, NaiveDate, Utc};

use super::domain::ApplicationDraft;
use crate::hostel::settings::SettingsRecord;
use crate::hostel::users::normalize_email;

const MAX_YEAR_OF_STUDY: u8 = 8;

/// Validation errors raised before an application reaches the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeViolation {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("year of study must be between 1 and {max}, found {found}")]
    InvalidYear { found: u8, max: u8 },
    #[error("the application deadline ({deadline}) has passed")]
    DeadlinePassed { deadline: NaiveDate },
    #[error("student {student_id} already has {existing} application(s); the limit is {limit}")]
    LimitReached {
        student_id: String,
        existing: usize,
        limit: u32,
    },
}

impl IntakeViolation {
    /// Limits are a conflict with existing data rather than a malformed request.
    pub const fn is_conflict(&self) -> bool {
        matches!(self, IntakeViolation::LimitReached { .. })
    }
}

/// Trims free-text fields, lowercases the email, and rejects incomplete drafts.
pub(crate) fn sanitize(draft: ApplicationDraft) -> Result<ApplicationDraft, IntakeViolation> {
    let student_id = required("student_id", &draft.student_id)?;
    let name = required("name", &draft.name)?;
    let program = required("program", &draft.program)?;
    let preferred_hostel = required("preferred_hostel", &draft.preferred_hostel)?;
    let email = normalize_email(&draft.email)
        .ok_or_else(|| IntakeViolation::InvalidEmail(draft.email.clone()))?;

    if draft.year == 0 || draft.year > MAX_YEAR_OF_STUDY {
        return Err(IntakeViolation::InvalidYear {
            found: draft.year,
            max: MAX_YEAR_OF_STUDY,
        });
    }

    Ok(ApplicationDraft {
        student_id,
        name,
        email,
        program,
        year: draft.year,
        preferred_hostel,
        room_type: draft.room_type,
    })
}

/// Refuses submissions after the configured deadline.
pub(crate) fn check_window(
    settings: &SettingsRecord,
    now: DateTime<Utc>,
) -> Result<(), IntakeViolation> {
    match settings.application_deadline {
        Some(deadline) if now.date_naive() > deadline => {
            Err(IntakeViolation::DeadlinePassed { deadline })
        }
        _ => Ok(()),
    }
}

/// Per-student cap. `existing` must be counted under the same lock as the insert.
pub(crate) fn check_limit(
    student_id: &str,
    existing: usize,
    limit: u32,
) -> Result<(), IntakeViolation> {
    if existing >= limit as usize {
        return Err(IntakeViolation::LimitReached {
            student_id: student_id.to_string(),
            existing,
            limit,
        });
    }
    Ok(())
}

fn required(field: &'static str, value: &str) -> Result<String, IntakeViolation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(IntakeViolation::MissingField { field })
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hostel::applications::domain::RoomType;
    use chrono::TimeZone;

    fn draft() -> ApplicationDraft {
        ApplicationDraft {
            student_id: " S-1001 ".to_string(),
            name: "Ada Obi".to_string(),
            email: "Ada@Example.EDU".to_string(),
            program: "CS".to_string(),
            year: 2,
            preferred_hostel: "hostel-0001".to_string(),
            room_type: RoomType::Single,
        }
    }

    #[test]
    fn sanitize_trims_and_lowercases() {
        let clean = sanitize(draft()).expect("valid draft");
        assert_eq!(clean.student_id, "S-1001");
        assert_eq!(clean.email, "ada@example.edu");
    }

    #[test]
    fn sanitize_reports_first_missing_field() {
        let mut incomplete = draft();
        incomplete.program = "  ".to_string();
        assert_eq!(
            sanitize(incomplete),
            Err(IntakeViolation::MissingField { field: "program" })
        );
    }

    #[test]
    fn sanitize_rejects_out_of_range_year() {
        let mut invalid = draft();
        invalid.year = 0;
        assert!(matches!(
            sanitize(invalid),
            Err(IntakeViolation::InvalidYear { found: 0, .. })
        ));
    }

    #[test]
    fn window_closes_after_the_deadline_day() {
        let now = Utc.with_ymd_and_hms(2025, 3, 2, 8, 0, 0).unwrap();
        let mut settings = SettingsRecord::defaults(now);

        settings.application_deadline = NaiveDate::from_ymd_opt(2025, 3, 2);
        assert_eq!(check_window(&settings, now), Ok(()));

        settings.application_deadline = NaiveDate::from_ymd_opt(2025, 3, 1);
        assert!(matches!(
            check_window(&settings, now),
            Err(IntakeViolation::DeadlinePassed { .. })
        ));
    }

    #[test]
    fn limit_counts_existing_applications() {
        assert_eq!(check_limit("S-1", 1, 2), Ok(()));
        let violation = check_limit("S-1", 1, 1).expect_err("limit of one");
        assert!(violation.is_conflict());
    }
}
