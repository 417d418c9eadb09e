use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{info, warn};

use super::domain::{HostelDraft, HostelId, HostelPatch, HostelRecord};
use super::occupancy::{balance, check_consistency, occupancy_snapshot, OccupancyEntry};
use super::{HostelError, HostelRepository};
use crate::store::RepositoryError;

static HOSTEL_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_hostel_id() -> HostelId {
    let id = HOSTEL_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    HostelId(format!("hostel-{id:04}"))
}

/// Hostel CRUD with every write routed through the occupancy balance check.
pub struct HostelService<R> {
    repository: Arc<R>,
}

impl<R> HostelService<R>
where
    R: HostelRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// All hostels, refusing to serve any record whose figures have drifted.
    pub fn list(&self) -> Result<Vec<HostelRecord>, HostelError> {
        let hostels = self.repository.list()?;
        ensure_consistent(&hostels)?;
        Ok(hostels)
    }

    pub fn occupancy(&self) -> Result<Vec<OccupancyEntry>, HostelError> {
        Ok(occupancy_snapshot(&self.list()?))
    }

    pub fn create(&self, draft: HostelDraft) -> Result<HostelRecord, HostelError> {
        let name = required_name(&draft.name)?;
        let available = balance(draft.capacity, draft.occupied, draft.available)?;
        if self.repository.find_by_name(&name)?.is_some() {
            return Err(HostelError::DuplicateName(name));
        }

        let record = HostelRecord {
            id: next_hostel_id(),
            name: name.clone(),
            capacity: draft.capacity,
            occupied: draft.occupied,
            available,
            category: draft.category,
            warden: draft.warden.trim().to_string(),
        };

        let stored = self.repository.insert(record).map_err(|err| match err {
            RepositoryError::Conflict => HostelError::DuplicateName(name),
            other => HostelError::Repository(other),
        })?;
        info!(
            hostel_id = %stored.id,
            capacity = stored.capacity,
            occupied = stored.occupied,
            "hostel created"
        );
        Ok(stored)
    }

    pub fn update(&self, id: &HostelId, patch: HostelPatch) -> Result<HostelRecord, HostelError> {
        let mut record = self
            .repository
            .fetch(id)?
            .ok_or_else(|| HostelError::NotFound(id.clone()))?;

        if let Some(name) = patch.name {
            let name = required_name(&name)?;
            if let Some(other) = self.repository.find_by_name(&name)? {
                if other.id != record.id {
                    return Err(HostelError::DuplicateName(name));
                }
            }
            record.name = name;
        }
        if let Some(category) = patch.category {
            record.category = category;
        }
        if let Some(warden) = patch.warden {
            record.warden = warden.trim().to_string();
        }

        let capacity = patch.capacity.unwrap_or(record.capacity);
        let occupied = patch.occupied.unwrap_or(record.occupied);
        record.available = balance(capacity, occupied, patch.available)?;
        record.capacity = capacity;
        record.occupied = occupied;

        let name = record.name.clone();
        let stored = self.repository.update(record).map_err(|err| match err {
            RepositoryError::NotFound => HostelError::NotFound(id.clone()),
            RepositoryError::Conflict => HostelError::DuplicateName(name),
            other => HostelError::Repository(other),
        })?;
        info!(
            hostel_id = %stored.id,
            capacity = stored.capacity,
            occupied = stored.occupied,
            available = stored.available,
            "hostel updated"
        );
        Ok(stored)
    }
}

pub(crate) fn ensure_consistent(hostels: &[HostelRecord]) -> Result<(), HostelError> {
    for hostel in hostels {
        if let Err(violation) = check_consistency(hostel) {
            warn!(hostel_id = %hostel.id, error = %violation, "inconsistent hostel record");
            return Err(HostelError::Corrupt(violation));
        }
    }
    Ok(())
}

fn required_name(raw: &str) -> Result<String, HostelError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(HostelError::Validation("name is required".to_string()));
    }
    Ok(name.to_string())
}
