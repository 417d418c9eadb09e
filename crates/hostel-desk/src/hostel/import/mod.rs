//! CSV snapshot import for offline reporting and seeding.

mod parser;

use std::io::Read;
use std::path::Path;

use crate::hostel::applications::ApplicationRecord;
use crate::hostel::hostels::HostelRecord;

#[derive(Debug)]
pub enum ImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Row { line: usize, message: String },
}

impl ImportError {
    pub(crate) fn row(line: usize, message: impl Into<String>) -> Self {
        Self::Row {
            line,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(err) => write!(f, "failed to read snapshot: {}", err),
            ImportError::Csv(err) => write!(f, "invalid snapshot CSV data: {}", err),
            ImportError::Row { line, message } => write!(f, "line {}: {}", line, message),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::Io(err) => Some(err),
            ImportError::Csv(err) => Some(err),
            ImportError::Row { .. } => None,
        }
    }
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Application and hostel records loaded from CSV exports.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub applications: Vec<ApplicationRecord>,
    pub hostels: Vec<HostelRecord>,
}

pub struct SnapshotImporter;

impl SnapshotImporter {
    pub fn applications_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<ApplicationRecord>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::applications_from_reader(file)
    }

    pub fn applications_from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<ApplicationRecord>, ImportError> {
        parser::parse_applications(reader)
    }

    pub fn hostels_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<HostelRecord>, ImportError> {
        let file = std::fs::File::open(path)?;
        Self::hostels_from_reader(file)
    }

    /// Every row must satisfy the occupancy invariant; `available` is derived.
    pub fn hostels_from_reader<R: Read>(reader: R) -> Result<Vec<HostelRecord>, ImportError> {
        parser::parse_hostels(reader)
    }

    pub fn snapshot_from_paths<P, Q>(
        applications: P,
        hostels: Option<Q>,
    ) -> Result<Snapshot, ImportError>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let applications = Self::applications_from_path(applications)?;
        let hostels = match hostels {
            Some(path) => Self::hostels_from_path(path)?,
            None => Vec::new(),
        };
        Ok(Snapshot {
            applications,
            hostels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hostel::applications::ApplicationStatus;

    const APPLICATIONS: &str = "\
id,student_id,name,email,program,year,preferred_hostel,room_type,status,submitted_at,reviewed_by
app-1,S-1,Ada Obi,ADA@example.edu,CS,2,hostel-0001,single,approved,2025-01-05T08:30:00Z,warden@example.edu
app-2,S-2,Bola Ade,bola@example.edu,EE,1,hostel-0002,shared,pending,2025-02-01,
";

    #[test]
    fn applications_parse_with_optional_reviewer() {
        let records =
            SnapshotImporter::applications_from_reader(APPLICATIONS.as_bytes()).expect("parses");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].status, ApplicationStatus::Approved);
        assert_eq!(records[0].email, "ada@example.edu");
        assert_eq!(records[0].reviewed_by.as_deref(), Some("warden@example.edu"));
        assert_eq!(records[1].reviewed_by, None);
    }

    #[test]
    fn reviewed_row_without_reviewer_is_rejected() {
        let csv = "\
id,student_id,name,email,program,year,preferred_hostel,room_type,status,submitted_at,reviewed_by
app-1,S-1,Ada Obi,ada@example.edu,CS,2,hostel-0001,single,rejected,2025-01-05,
";
        match SnapshotImporter::applications_from_reader(csv.as_bytes()) {
            Err(ImportError::Row { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("no reviewer"));
            }
            other => panic!("expected row error, got {other:?}"),
        }
    }

    #[test]
    fn hostels_derive_available_and_enforce_capacity() {
        let csv = "\
id,name,capacity,occupied,category,warden
h-1,Moremi Hall,100,40,female,Mrs. Adeyemi
h-2,Kuti Hall,50,50,Male,Mr. Okafor
";
        let hostels = SnapshotImporter::hostels_from_reader(csv.as_bytes()).expect("parses");
        assert_eq!(hostels[0].available, 60);
        assert_eq!(hostels[1].available, 0);

        let overfull = "\
id,name,capacity,occupied,category,warden
h-1,Moremi Hall,10,11,female,
";
        assert!(matches!(
            SnapshotImporter::hostels_from_reader(overfull.as_bytes()),
            Err(ImportError::Row { line: 2, .. })
        ));
    }
}
