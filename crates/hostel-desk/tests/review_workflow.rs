use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use hostel_desk::error::ErrorKind;
use hostel_desk::hostel::applications::{
    ApplicationDraft, ApplicationService, ApplicationStatus, RoomType,
};
use hostel_desk::hostel::hostels::{HostelCategory, HostelDraft, HostelPatch, HostelService};
use hostel_desk::hostel::report::ReportService;
use hostel_desk::hostel::settings::{SettingsPatch, SettingsService};
use hostel_desk::store::InMemoryStore;

fn draft(student_id: &str, program: &str) -> ApplicationDraft {
    ApplicationDraft {
        student_id: student_id.to_string(),
        name: "Student Applicant".to_string(),
        email: format!("{}@students.example.edu", student_id.to_ascii_lowercase()),
        program: program.to_string(),
        year: 1,
        preferred_hostel: "Moremi Hall".to_string(),
        room_type: RoomType::Shared,
    }
}

#[test]
fn review_cycle_feeds_the_reports() {
    let store = Arc::new(InMemoryStore::default());
    let applications = ApplicationService::new(store.clone(), store.clone());
    let hostels = HostelService::new(store.clone());
    let reports = ReportService::new(store.clone(), store.clone());
    let opened = Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap();

    let hall = hostels
        .create(HostelDraft {
            name: "Moremi Hall".to_string(),
            capacity: 100,
            occupied: 40,
            available: None,
            category: HostelCategory::Female,
            warden: "Mrs. Adeyemi".to_string(),
        })
        .expect("hostel created");
    hostels
        .create(HostelDraft {
            name: "Kuti Hall".to_string(),
            capacity: 50,
            occupied: 50,
            available: Some(0),
            category: HostelCategory::Male,
            warden: "Mr. Okafor".to_string(),
        })
        .expect("hostel created");

    let first = applications
        .submit(draft("S-1", "CS"), opened)
        .expect("submitted");
    let second = applications
        .submit(draft("S-2", "CS"), opened + Duration::days(1))
        .expect("submitted");
    applications
        .submit(draft("S-3", "EE"), opened + Duration::days(40))
        .expect("submitted");

    applications
        .set_status(
            &first.id,
            ApplicationStatus::Approved,
            "warden@example.edu",
            opened + Duration::days(2),
        )
        .expect("approved");
    applications
        .set_status(
            &second.id,
            ApplicationStatus::Rejected,
            "warden@example.edu",
            opened + Duration::days(2),
        )
        .expect("rejected");

    let dashboard = reports.dashboard().expect("dashboard");
    assert_eq!(dashboard.total_applications, 3);
    assert_eq!(dashboard.pending_applications, 1);
    assert_eq!(dashboard.total_students, 90);

    let stats = reports.stats().expect("stats");
    assert_eq!(stats.application_success_rate, 33);
    assert_eq!(stats.hostel_occupancy_rate, 60);

    hostels
        .update(
            &hall.id,
            HostelPatch {
                occupied: Some(41),
                ..HostelPatch::default()
            },
        )
        .expect("student moved in");
    assert_eq!(reports.dashboard().expect("dashboard").total_students, 91);

    let trends = reports.monthly_trends().expect("trends");
    assert_eq!(trends.len(), 2);
    assert_eq!(trends[0].month, "Jan 2025");
    assert_eq!(trends[0].applications, 2);
}

#[test]
fn settings_drive_intake_rules() {
    let store = Arc::new(InMemoryStore::default());
    let applications = ApplicationService::new(store.clone(), store.clone());
    let settings = SettingsService::new(store.clone());
    let now = Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap();

    settings
        .update(
            SettingsPatch {
                auto_approval_enabled: Some(true),
                max_applications_per_student: Some(2),
                ..SettingsPatch::default()
            },
            now,
        )
        .expect("settings updated");

    let first = applications
        .submit(draft("S-9", "Law"), now)
        .expect("submitted");
    assert_eq!(first.status, ApplicationStatus::Approved);
    applications
        .submit(draft("S-9", "Law"), now)
        .expect("second allowed");
    let third = applications
        .submit(draft("S-9", "Law"), now)
        .expect_err("third refused");
    assert_eq!(third.kind(), ErrorKind::Conflict);

    settings
        .update(
            serde_json::from_str(r#"{"application_deadline": "2025-04-30"}"#)
                .expect("patch parses"),
            now,
        )
        .expect("deadline set");
    let late = applications
        .submit(draft("S-10", "Law"), now)
        .expect_err("deadline passed");
    assert_eq!(late.kind(), ErrorKind::Validation);
}
