//! Accommodation applications: intake validation, the review state machine, and HTTP routes.
//!
//! Status changes flow through [`status::transition`]; approved and rejected are terminal, and
//! repeating the current status is an idempotent no-op.

pub mod domain;
pub(crate) mod intake;
pub mod repository;
pub mod router;
pub mod service;
pub mod status;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationDraft, ApplicationId, ApplicationRecord, ApplicationStatus, RoomType,
    UnknownStatus,
};
pub use intake::IntakeViolation;
pub use repository::ApplicationRepository;
pub use router::application_router;
pub use service::{ApplicationService, ApplicationServiceError, AUTO_APPROVAL_REVIEWER};
pub use status::{StatusChange, StatusError};
