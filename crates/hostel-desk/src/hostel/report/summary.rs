//! Pure folds over application and hostel snapshots.

use chrono::Datelike;

use super::views::{DashboardStats, MonthlyBucket, ProgramShare, ReportStats, StatusBreakdown};
use crate::hostel::applications::{ApplicationRecord, ApplicationStatus};
use crate::hostel::hostels::HostelRecord;

pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// `round(100 * numerator / denominator)` with halves rounded up; 0 when the denominator is 0.
pub fn percentage(numerator: u64, denominator: u64) -> u32 {
    if denominator == 0 {
        return 0;
    }
    let (numerator, denominator) = (u128::from(numerator), u128::from(denominator));
    let scaled = (200 * numerator + denominator) / (2 * denominator);
    u32::try_from(scaled).unwrap_or(u32::MAX)
}

pub fn dashboard_stats(
    applications: &[ApplicationRecord],
    hostels: &[HostelRecord],
) -> DashboardStats {
    DashboardStats {
        total_applications: applications.len(),
        pending_applications: applications
            .iter()
            .filter(|record| record.status == ApplicationStatus::Pending)
            .count(),
        total_hostels: hostels.len(),
        total_students: hostels.iter().map(|hostel| u64::from(hostel.occupied)).sum(),
    }
}

/// Newest first, at most `limit`. Equal timestamps keep their stored order.
pub fn recent_applications(
    applications: &[ApplicationRecord],
    limit: usize,
) -> Vec<ApplicationRecord> {
    let mut ordered: Vec<&ApplicationRecord> = applications.iter().collect();
    ordered.sort_by(|left, right| right.submitted_at.cmp(&left.submitted_at));
    ordered.into_iter().take(limit).cloned().collect()
}

pub fn report_stats(applications: &[ApplicationRecord], hostels: &[HostelRecord]) -> ReportStats {
    let approved = applications
        .iter()
        .filter(|record| record.status == ApplicationStatus::Approved)
        .count();
    let occupied: u64 = hostels.iter().map(|hostel| u64::from(hostel.occupied)).sum();
    let capacity: u64 = hostels.iter().map(|hostel| u64::from(hostel.capacity)).sum();

    ReportStats {
        application_success_rate: percentage(approved as u64, applications.len() as u64),
        hostel_occupancy_rate: percentage(occupied, capacity),
    }
}

/// Share of applications per program, in first-seen order. Shares need not sum to 100.
pub fn program_distribution(applications: &[ApplicationRecord]) -> Vec<ProgramShare> {
    let mut counts: Vec<(&str, u64)> = Vec::new();
    for record in applications {
        match counts
            .iter_mut()
            .find(|(program, _)| *program == record.program)
        {
            Some((_, count)) => *count += 1,
            None => counts.push((record.program.as_str(), 1)),
        }
    }

    let total = applications.len() as u64;
    counts
        .into_iter()
        .map(|(program, count)| ProgramShare {
            program: program.to_string(),
            percentage: percentage(count, total),
        })
        .collect()
}

/// Submissions per UTC calendar month, in order of first occurrence.
pub fn monthly_trends(applications: &[ApplicationRecord]) -> Vec<MonthlyBucket> {
    let mut buckets: Vec<((i32, u32), MonthlyBucket)> = Vec::new();
    for record in applications {
        let key = (record.submitted_at.year(), record.submitted_at.month());
        match buckets.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, bucket)) => bucket.applications += 1,
            None => buckets.push((
                key,
                MonthlyBucket {
                    month: record.submitted_at.format("%b %Y").to_string(),
                    applications: 1,
                },
            )),
        }
    }

    buckets.into_iter().map(|(_, bucket)| bucket).collect()
}

pub fn status_breakdown(applications: &[ApplicationRecord]) -> StatusBreakdown {
    applications
        .iter()
        .fold(StatusBreakdown::default(), |mut breakdown, record| {
            match record.status {
                ApplicationStatus::Pending => breakdown.pending += 1,
                ApplicationStatus::Approved => breakdown.approved += 1,
                ApplicationStatus::Rejected => breakdown.rejected += 1,
            }
            breakdown
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hostel::applications::{ApplicationDraft, ApplicationId, RoomType};
    use crate::hostel::hostels::{HostelCategory, HostelId};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
    }

    fn application(
        id: &str,
        program: &str,
        status: ApplicationStatus,
        submitted_at: DateTime<Utc>,
    ) -> ApplicationRecord {
        let mut record = ApplicationRecord::from_draft(
            ApplicationId(id.to_string()),
            ApplicationDraft {
                student_id: format!("S-{id}"),
                name: "Student".to_string(),
                email: format!("{id}@example.edu"),
                program: program.to_string(),
                year: 1,
                preferred_hostel: "hostel-0001".to_string(),
                room_type: RoomType::Shared,
            },
            submitted_at,
        );
        record.status = status;
        record
    }

    fn hostel(capacity: u32, occupied: u32) -> HostelRecord {
        HostelRecord {
            id: HostelId(format!("hostel-{capacity}-{occupied}")),
            name: format!("Hall {capacity}"),
            capacity,
            occupied,
            available: capacity - occupied,
            category: HostelCategory::Male,
            warden: String::new(),
        }
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 200), 1);
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(5, 0), 0);
    }

    #[test]
    fn dashboard_counts_pending_and_students() {
        let now = at(2025, 1, 1, 0);
        let applications = vec![
            application("a1", "CS", ApplicationStatus::Approved, now),
            application("a2", "CS", ApplicationStatus::Pending, now),
            application("a3", "EE", ApplicationStatus::Rejected, now),
        ];
        let stats = dashboard_stats(&applications, &[hostel(100, 40), hostel(50, 50)]);

        assert_eq!(stats.total_applications, 3);
        assert_eq!(stats.pending_applications, 1);
        assert_eq!(stats.total_hostels, 2);
        assert_eq!(stats.total_students, 90);
    }

    #[test]
    fn occupancy_rate_over_all_hostels() {
        let stats = report_stats(&[], &[hostel(100, 40), hostel(50, 50)]);
        assert_eq!(stats.hostel_occupancy_rate, 60);
        assert_eq!(stats.application_success_rate, 0);
    }

    #[test]
    fn zero_capacity_gives_zero_occupancy_rate() {
        assert_eq!(report_stats(&[], &[hostel(0, 0)]).hostel_occupancy_rate, 0);
    }

    #[test]
    fn success_rate_counts_approved_share() {
        let now = at(2025, 1, 1, 0);
        let applications = vec![
            application("a1", "CS", ApplicationStatus::Approved, now),
            application("a2", "CS", ApplicationStatus::Approved, now),
            application("a3", "EE", ApplicationStatus::Pending, now),
        ];
        assert_eq!(report_stats(&applications, &[]).application_success_rate, 67);
    }

    #[test]
    fn program_shares_follow_first_seen_order() {
        let now = at(2025, 1, 1, 0);
        let applications = vec![
            application("a1", "CS", ApplicationStatus::Pending, now),
            application("a2", "EE", ApplicationStatus::Pending, now),
            application("a3", "CS", ApplicationStatus::Pending, now),
        ];

        let shares = program_distribution(&applications);
        assert_eq!(
            shares,
            vec![
                ProgramShare {
                    program: "CS".to_string(),
                    percentage: 67
                },
                ProgramShare {
                    program: "EE".to_string(),
                    percentage: 33
                },
            ]
        );
        assert!(program_distribution(&[]).is_empty());
    }

    #[test]
    fn recent_is_bounded_newest_first_and_stable() {
        let applications = vec![
            application("old", "CS", ApplicationStatus::Pending, at(2025, 1, 1, 0)),
            application("tie-a", "CS", ApplicationStatus::Pending, at(2025, 3, 1, 0)),
            application("newest", "CS", ApplicationStatus::Pending, at(2025, 4, 1, 0)),
            application("tie-b", "CS", ApplicationStatus::Pending, at(2025, 3, 1, 0)),
            application("mid", "CS", ApplicationStatus::Pending, at(2025, 2, 1, 0)),
            application("older", "CS", ApplicationStatus::Pending, at(2024, 12, 1, 0)),
        ];

        let recent = recent_applications(&applications, DEFAULT_RECENT_LIMIT);
        let ids: Vec<_> = recent.iter().map(|record| record.id.0.as_str()).collect();
        assert_eq!(ids, vec!["newest", "tie-a", "tie-b", "mid", "old"]);
        assert!(recent
            .windows(2)
            .all(|pair| pair[0].submitted_at >= pair[1].submitted_at));
        assert_eq!(recent_applications(&applications, 2).len(), 2);
    }

    #[test]
    fn monthly_trends_bucket_by_utc_month() {
        let applications = vec![
            application("a1", "CS", ApplicationStatus::Pending, at(2025, 2, 3, 9)),
            application("a2", "CS", ApplicationStatus::Pending, at(2025, 1, 31, 23)),
            application("a3", "CS", ApplicationStatus::Pending, at(2025, 2, 28, 1)),
            application("a4", "CS", ApplicationStatus::Pending, at(2024, 2, 10, 1)),
        ];

        let trends = monthly_trends(&applications);
        let rendered: Vec<_> = trends
            .iter()
            .map(|bucket| (bucket.month.as_str(), bucket.applications))
            .collect();
        assert_eq!(
            rendered,
            vec![("Feb 2025", 2), ("Jan 2025", 1), ("Feb 2024", 1)]
        );
    }

    #[test]
    fn breakdown_counts_each_status() {
        let now = at(2025, 1, 1, 0);
        let applications = vec![
            application("a1", "CS", ApplicationStatus::Approved, now),
            application("a2", "CS", ApplicationStatus::Pending, now),
            application("a3", "EE", ApplicationStatus::Rejected, now),
            application("a4", "EE", ApplicationStatus::Pending, now),
        ];
        let breakdown = status_breakdown(&applications);
        assert_eq!(breakdown.pending, 2);
        assert_eq!(breakdown.approved, 1);
        assert_eq!(breakdown.rejected, 1);
        assert_eq!(breakdown.total(), 4);
    }
}
