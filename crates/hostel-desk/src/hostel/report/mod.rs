//! Aggregation over applications and hostels: dashboard figures, report rates, program
//! distribution, monthly trends, and the CSV ledger.

mod export;
mod router;
mod service;
pub mod summary;
pub mod views;

pub use export::{applications_csv, write_applications_csv};
pub use router::report_router;
pub use service::ReportService;
pub use summary::{
    dashboard_stats, monthly_trends, percentage, program_distribution, recent_applications,
    report_stats, status_breakdown, DEFAULT_RECENT_LIMIT,
};
pub use views::{DashboardStats, MonthlyBucket, ProgramShare, ReportStats, StatusBreakdown};

use crate::error::ErrorKind;
use crate::hostel::hostels::HostelError;
use crate::store::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Hostels(#[from] HostelError),
    #[error("failed to render CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::Hostels(err) => err.kind(),
            ReportError::Csv(_) => ErrorKind::Internal,
            ReportError::Repository(err) => err.kind(),
        }
    }
}
