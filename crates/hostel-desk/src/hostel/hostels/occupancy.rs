//! Occupancy accounting for hostel records.
//!
//! [`occupancy_snapshot`] is a read projection that trusts stored figures. Writes go through
//! [`balance`], which derives `available` and refuses anything that would break
//! `available + occupied == capacity`.

use serde::Serialize;

use super::domain::{HostelId, HostelRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OccupancyEntry {
    pub id: HostelId,
    pub name: String,
    pub capacity: u32,
    pub occupied: u32,
    pub available: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OccupancyViolation {
    #[error("occupied ({occupied}) exceeds capacity ({capacity})")]
    OverCapacity { occupied: u32, capacity: u32 },
    #[error("available ({supplied}) does not match capacity minus occupied ({expected})")]
    AvailableMismatch { supplied: u32, expected: u32 },
    #[error(
        "hostel {id} is inconsistent: capacity {capacity}, occupied {occupied}, available {available}"
    )]
    Inconsistent {
        id: HostelId,
        capacity: u32,
        occupied: u32,
        available: u32,
    },
}

pub fn occupancy_snapshot(hostels: &[HostelRecord]) -> Vec<OccupancyEntry> {
    hostels
        .iter()
        .map(|hostel| OccupancyEntry {
            id: hostel.id.clone(),
            name: hostel.name.clone(),
            capacity: hostel.capacity,
            occupied: hostel.occupied,
            available: hostel.available,
        })
        .collect()
}

/// Compute `available` for a write, cross-checking any client-supplied figure.
pub fn balance(
    capacity: u32,
    occupied: u32,
    supplied_available: Option<u32>,
) -> Result<u32, OccupancyViolation> {
    let expected = capacity
        .checked_sub(occupied)
        .ok_or(OccupancyViolation::OverCapacity { occupied, capacity })?;

    match supplied_available {
        Some(supplied) if supplied != expected => {
            Err(OccupancyViolation::AvailableMismatch { supplied, expected })
        }
        _ => Ok(expected),
    }
}

pub fn check_consistency(hostel: &HostelRecord) -> Result<(), OccupancyViolation> {
    let consistent = hostel.occupied <= hostel.capacity
        && u64::from(hostel.available) + u64::from(hostel.occupied) == u64::from(hostel.capacity);
    if consistent {
        Ok(())
    } else {
        Err(OccupancyViolation::Inconsistent {
            id: hostel.id.clone(),
            capacity: hostel.capacity,
            occupied: hostel.occupied,
            available: hostel.available,
        })
    }
}
