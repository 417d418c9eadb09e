use std::io::Read;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use super::ImportError;
use crate::hostel::applications::{
    ApplicationId, ApplicationRecord, ApplicationStatus, RoomType,
};
use crate::hostel::hostels::occupancy::balance;
use crate::hostel::hostels::{HostelCategory, HostelId, HostelRecord};

pub(crate) fn parse_applications<R: Read>(
    reader: R,
) -> Result<Vec<ApplicationRecord>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<ApplicationRow>().enumerate() {
        let line = index + 2;
        records.push(row?.into_record(line)?);
    }

    Ok(records)
}

pub(crate) fn parse_hostels<R: Read>(reader: R) -> Result<Vec<HostelRecord>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.deserialize::<HostelRow>().enumerate() {
        let line = index + 2;
        records.push(row?.into_record(line)?);
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct ApplicationRow {
    id: String,
    student_id: String,
    name: String,
    email: String,
    program: String,
    year: u8,
    preferred_hostel: String,
    room_type: RoomType,
    status: String,
    submitted_at: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    reviewed_by: Option<String>,
}

impl ApplicationRow {
    fn into_record(self, line: usize) -> Result<ApplicationRecord, ImportError> {
        let status = self
            .status
            .parse::<ApplicationStatus>()
            .map_err(|err| ImportError::row(line, err.to_string()))?;
        let submitted_at = parse_datetime(&self.submitted_at).ok_or_else(|| {
            ImportError::row(
                line,
                format!("unreadable submitted_at '{}'", self.submitted_at),
            )
        })?;

        match (status, self.reviewed_by.is_some()) {
            (ApplicationStatus::Pending, true) => {
                return Err(ImportError::row(line, "pending application has a reviewer"));
            }
            (status, false) if status != ApplicationStatus::Pending => {
                return Err(ImportError::row(
                    line,
                    format!("{status} application has no reviewer"),
                ));
            }
            _ => {}
        }

        Ok(ApplicationRecord {
            id: ApplicationId(self.id),
            student_id: self.student_id,
            name: self.name,
            email: self.email.to_ascii_lowercase(),
            program: self.program,
            year: self.year,
            preferred_hostel: self.preferred_hostel,
            room_type: self.room_type,
            status,
            submitted_at,
            reviewed_by: self.reviewed_by,
            reviewed_at: None,
        })
    }
}

#[derive(Debug, Deserialize)]
struct HostelRow {
    id: String,
    name: String,
    capacity: u32,
    occupied: u32,
    category: String,
    #[serde(default)]
    warden: String,
}

impl HostelRow {
    fn into_record(self, line: usize) -> Result<HostelRecord, ImportError> {
        let category = self
            .category
            .parse::<HostelCategory>()
            .map_err(|message| ImportError::row(line, message))?;
        let available = balance(self.capacity, self.occupied, None)
            .map_err(|violation| ImportError::row(line, violation.to_string()))?;

        Ok(HostelRecord {
            id: HostelId(self.id),
            name: self.name,
            capacity: self.capacity,
            occupied: self.occupied,
            available,
            category,
            warden: self.warden,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// RFC 3339 timestamps, or bare `YYYY-MM-DD` dates taken as midnight UTC.
fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
