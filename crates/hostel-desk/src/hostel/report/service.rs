use std::sync::Arc;

use tracing::debug;

use super::export::applications_csv;
use super::summary;
use super::views::{DashboardStats, MonthlyBucket, ProgramShare, ReportStats, StatusBreakdown};
use super::ReportError;
use crate::hostel::applications::{ApplicationRecord, ApplicationRepository};
use crate::hostel::hostels::{
    ensure_consistent, occupancy_snapshot, HostelRecord, HostelRepository, OccupancyEntry,
};

/// Read-side facade that loads point-in-time snapshots and folds them.
pub struct ReportService<A, H> {
    applications: Arc<A>,
    hostels: Arc<H>,
}

impl<A, H> ReportService<A, H>
where
    A: ApplicationRepository + 'static,
    H: HostelRepository + 'static,
{
    pub fn new(applications: Arc<A>, hostels: Arc<H>) -> Self {
        Self {
            applications,
            hostels,
        }
    }

    fn applications(&self) -> Result<Vec<ApplicationRecord>, ReportError> {
        Ok(self.applications.list(None)?)
    }

    fn hostels(&self) -> Result<Vec<HostelRecord>, ReportError> {
        let hostels = self.hostels.list()?;
        ensure_consistent(&hostels)?;
        Ok(hostels)
    }

    pub fn dashboard(&self) -> Result<DashboardStats, ReportError> {
        let stats = summary::dashboard_stats(&self.applications()?, &self.hostels()?);
        debug!(
            total_applications = stats.total_applications,
            pending_applications = stats.pending_applications,
            "dashboard stats computed"
        );
        Ok(stats)
    }

    pub fn recent(&self, limit: usize) -> Result<Vec<ApplicationRecord>, ReportError> {
        Ok(summary::recent_applications(&self.applications()?, limit))
    }

    pub fn occupancy(&self) -> Result<Vec<OccupancyEntry>, ReportError> {
        Ok(occupancy_snapshot(&self.hostels()?))
    }

    pub fn stats(&self) -> Result<ReportStats, ReportError> {
        Ok(summary::report_stats(&self.applications()?, &self.hostels()?))
    }

    pub fn programs(&self) -> Result<Vec<ProgramShare>, ReportError> {
        Ok(summary::program_distribution(&self.applications()?))
    }

    pub fn monthly_trends(&self) -> Result<Vec<MonthlyBucket>, ReportError> {
        Ok(summary::monthly_trends(&self.applications()?))
    }

    pub fn breakdown(&self) -> Result<StatusBreakdown, ReportError> {
        Ok(summary::status_breakdown(&self.applications()?))
    }

    pub fn export_csv(&self) -> Result<String, ReportError> {
        Ok(applications_csv(&self.applications()?)?)
    }
}
