use std::sync::{Mutex, MutexGuard};

use super::RepositoryError;
use crate::hostel::applications::{
    ApplicationId, ApplicationRecord, ApplicationRepository, ApplicationStatus, StatusChange,
};
use crate::hostel::hostels::{HostelId, HostelRecord, HostelRepository};
use crate::hostel::settings::{SettingsRecord, SettingsRepository};
use crate::hostel::users::{UserId, UserRecord, UserRepository};

/// Process-local store backing every collection. Each call holds one collection lock, so
/// writes are serialized per collection and the last writer wins.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    applications: Mutex<Vec<ApplicationRecord>>,
    hostels: Mutex<Vec<HostelRecord>>,
    users: Mutex<Vec<UserRecord>>,
    settings: Mutex<Option<SettingsRecord>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("store lock poisoned".to_string()))
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated from an offline snapshot. Records are taken as-is.
    pub fn with_records(applications: Vec<ApplicationRecord>, hostels: Vec<HostelRecord>) -> Self {
        Self {
            applications: Mutex::new(applications),
            hostels: Mutex::new(hostels),
            ..Self::default()
        }
    }
}

impl ApplicationRepository for InMemoryStore {
    fn insert_checked<E, F>(
        &self,
        record: ApplicationRecord,
        admit: F,
    ) -> Result<ApplicationRecord, E>
    where
        F: FnOnce(&[ApplicationRecord]) -> Result<(), E>,
        E: From<RepositoryError>,
    {
        let mut guard = lock(&self.applications)?;
        admit(&guard)?;
        if guard.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict.into());
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn apply_change<E, F>(&self, id: &ApplicationId, decide: F) -> Result<StatusChange, E>
    where
        F: FnOnce(&ApplicationRecord) -> Result<StatusChange, E>,
        E: From<RepositoryError>,
    {
        let mut guard = lock(&self.applications)?;
        let slot = guard
            .iter_mut()
            .find(|existing| &existing.id == id)
            .ok_or(RepositoryError::NotFound)?;
        let change = decide(&*slot)?;
        if let StatusChange::Applied(record) = &change {
            *slot = record.clone();
        }
        Ok(change)
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = lock(&self.applications)?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn list(
        &self,
        status: Option<ApplicationStatus>,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = lock(&self.applications)?;
        Ok(guard
            .iter()
            .filter(|record| status.map_or(true, |wanted| record.status == wanted))
            .cloned()
            .collect())
    }
}

impl HostelRepository for InMemoryStore {
    fn insert(&self, record: HostelRecord) -> Result<HostelRecord, RepositoryError> {
        let mut guard = lock(&self.hostels)?;
        let clash = guard.iter().any(|existing| {
            existing.id == record.id || existing.name.eq_ignore_ascii_case(&record.name)
        });
        if clash {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: HostelRecord) -> Result<HostelRecord, RepositoryError> {
        let mut guard = lock(&self.hostels)?;
        let clash = guard.iter().any(|existing| {
            existing.id != record.id && existing.name.eq_ignore_ascii_case(&record.name)
        });
        if clash {
            return Err(RepositoryError::Conflict);
        }
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == record.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = record.clone();
        Ok(record)
    }

    fn fetch(&self, id: &HostelId) -> Result<Option<HostelRecord>, RepositoryError> {
        let guard = lock(&self.hostels)?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn find_by_name(&self, name: &str) -> Result<Option<HostelRecord>, RepositoryError> {
        let name = name.trim();
        let guard = lock(&self.hostels)?;
        Ok(guard
            .iter()
            .find(|record| record.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    fn list(&self) -> Result<Vec<HostelRecord>, RepositoryError> {
        Ok(lock(&self.hostels)?.clone())
    }
}

impl UserRepository for InMemoryStore {
    fn insert(&self, record: UserRecord) -> Result<UserRecord, RepositoryError> {
        let mut guard = lock(&self.users)?;
        let clash = guard
            .iter()
            .any(|existing| existing.id == record.id || existing.email == record.email);
        if clash {
            return Err(RepositoryError::Conflict);
        }
        guard.push(record.clone());
        Ok(record)
    }

    fn update(&self, record: UserRecord) -> Result<UserRecord, RepositoryError> {
        let mut guard = lock(&self.users)?;
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == record.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = record.clone();
        Ok(record)
    }

    fn fetch(&self, id: &UserId) -> Result<Option<UserRecord>, RepositoryError> {
        let guard = lock(&self.users)?;
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, RepositoryError> {
        let guard = lock(&self.users)?;
        Ok(guard.iter().find(|record| record.email == email).cloned())
    }

    fn list(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        Ok(lock(&self.users)?.clone())
    }
}

impl SettingsRepository for InMemoryStore {
    fn get_or_create(&self, defaults: SettingsRecord) -> Result<SettingsRecord, RepositoryError> {
        let mut guard = lock(&self.settings)?;
        Ok(guard.get_or_insert(defaults).clone())
    }

    fn modify<E, F>(&self, defaults: SettingsRecord, edit: F) -> Result<SettingsRecord, E>
    where
        F: FnOnce(SettingsRecord) -> Result<SettingsRecord, E>,
        E: From<RepositoryError>,
    {
        let mut guard = lock(&self.settings)?;
        let current = guard.get_or_insert(defaults).clone();
        let updated = edit(current)?;
        *guard = Some(updated.clone());
        Ok(updated)
    }
}
