use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_applications: usize,
    pub pending_applications: usize,
    pub total_hostels: usize,
    /// Sum of `occupied` across all hostels.
    pub total_students: u64,
}

/// Whole-number percentages, rounded half up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportStats {
    pub application_success_rate: u32,
    pub hostel_occupancy_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramShare {
    pub program: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyBucket {
    /// Calendar month label such as `Jan 2025`.
    pub month: String,
    pub applications: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl StatusBreakdown {
    pub const fn total(&self) -> usize {
        self.pending + self.approved + self.rejected
    }
}
