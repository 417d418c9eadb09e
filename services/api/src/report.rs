use std::path::PathBuf;

use clap::Args;
use hostel_desk::error::AppError;
use hostel_desk::hostel::import::{Snapshot, SnapshotImporter};
use hostel_desk::hostel::report::{
    dashboard_stats, monthly_trends, program_distribution, recent_applications, report_stats,
    status_breakdown, DEFAULT_RECENT_LIMIT,
};

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    /// Application ledger CSV export
    #[arg(long)]
    pub(crate) applications: PathBuf,
    /// Optional hostel CSV export for occupancy figures
    #[arg(long)]
    pub(crate) hostels: Option<PathBuf>,
    /// Number of recent applications to list
    #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
    pub(crate) recent: usize,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let ReportArgs {
        applications,
        hostels,
        recent,
    } = args;

    let snapshot = SnapshotImporter::snapshot_from_paths(applications, hostels)?;
    print!("{}", render_report(&snapshot, recent));
    Ok(())
}

pub(crate) fn render_report(snapshot: &Snapshot, recent: usize) -> String {
    let Snapshot {
        applications,
        hostels,
    } = snapshot;
    let mut out = String::new();

    let dashboard = dashboard_stats(applications, hostels);
    let stats = report_stats(applications, hostels);
    let breakdown = status_breakdown(applications);

    out.push_str("Hostel administration report\n");
    out.push_str(&format!(
        "Applications: {} total, {} pending, {} approved, {} rejected\n",
        dashboard.total_applications, breakdown.pending, breakdown.approved, breakdown.rejected
    ));
    out.push_str(&format!(
        "Hostels: {} | Students housed: {}\n",
        dashboard.total_hostels, dashboard.total_students
    ));
    out.push_str(&format!(
        "Success rate {}% | Occupancy rate {}%\n",
        stats.application_success_rate, stats.hostel_occupancy_rate
    ));

    let programs = program_distribution(applications);
    if programs.is_empty() {
        out.push_str("\nProgram distribution: none\n");
    } else {
        out.push_str("\nProgram distribution\n");
        for share in &programs {
            out.push_str(&format!("- {}: {}%\n", share.program, share.percentage));
        }
    }

    let trends = monthly_trends(applications);
    if !trends.is_empty() {
        out.push_str("\nMonthly trends\n");
        for bucket in &trends {
            out.push_str(&format!("- {}: {}\n", bucket.month, bucket.applications));
        }
    }

    let latest = recent_applications(applications, recent);
    if !latest.is_empty() {
        out.push_str("\nRecent applications\n");
        for record in &latest {
            out.push_str(&format!(
                "- {} {} ({}) {} on {}\n",
                record.id,
                record.name,
                record.program,
                record.status,
                record.submitted_at.format("%Y-%m-%d")
            ));
        }
    }

    out
}
