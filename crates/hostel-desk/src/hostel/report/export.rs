//! CSV rendering of the application ledger.

use std::io::Write;

use chrono::SecondsFormat;
use serde::Serialize;

use crate::hostel::applications::ApplicationRecord;

/// Column layout shared with the snapshot importer.
const LEDGER_COLUMNS: [&str; 11] = [
    "id",
    "student_id",
    "name",
    "email",
    "program",
    "year",
    "preferred_hostel",
    "room_type",
    "status",
    "submitted_at",
    "reviewed_by",
];

#[derive(Debug, Serialize)]
struct LedgerRow<'a> {
    id: &'a str,
    student_id: &'a str,
    name: &'a str,
    email: &'a str,
    program: &'a str,
    year: u8,
    preferred_hostel: &'a str,
    room_type: &'static str,
    status: &'static str,
    submitted_at: String,
    reviewed_by: &'a str,
}

impl<'a> From<&'a ApplicationRecord> for LedgerRow<'a> {
    fn from(record: &'a ApplicationRecord) -> Self {
        Self {
            id: &record.id.0,
            student_id: &record.student_id,
            name: &record.name,
            email: &record.email,
            program: &record.program,
            year: record.year,
            preferred_hostel: &record.preferred_hostel,
            room_type: record.room_type.label(),
            status: record.status.label(),
            submitted_at: record
                .submitted_at
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            reviewed_by: record.reviewed_by.as_deref().unwrap_or_default(),
        }
    }
}

pub fn write_applications_csv<W: Write>(
    records: &[ApplicationRecord],
    writer: W,
) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    if records.is_empty() {
        csv_writer.write_record(LEDGER_COLUMNS)?;
    }
    for record in records {
        csv_writer.serialize(LedgerRow::from(record))?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn applications_csv(records: &[ApplicationRecord]) -> Result<String, csv::Error> {
    let mut buffer = Vec::new();
    write_applications_csv(records, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
