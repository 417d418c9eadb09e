use std::sync::Arc;

use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::{Extension, Router};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::auth::TokenAuthority;
use crate::hostel::applications::{
    application_router, ApplicationDraft, ApplicationId, ApplicationRecord,
    ApplicationRepository, ApplicationService, ApplicationStatus, RoomType, StatusChange,
};
use crate::hostel::settings::{SettingsRecord, SettingsRepository};
use crate::hostel::users::{UserId, UserRecord, UserRole, UserStatus};
use crate::store::{InMemoryStore, RepositoryError};

const TEST_SECRET: &str = "applications-test-secret";

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
}

pub(super) fn draft(student_id: &str) -> ApplicationDraft {
    ApplicationDraft {
        student_id: student_id.to_string(),
        name: "Ada Obi".to_string(),
        email: format!("{}@students.example.edu", student_id.to_ascii_lowercase()),
        program: "Computer Science".to_string(),
        year: 2,
        preferred_hostel: "hostel-0001".to_string(),
        room_type: RoomType::Double,
    }
}

pub(super) fn build_service() -> (
    ApplicationService<InMemoryStore, InMemoryStore>,
    Arc<InMemoryStore>,
) {
    let store = Arc::new(InMemoryStore::default());
    let service = ApplicationService::new(store.clone(), store.clone());
    (service, store)
}

pub(super) fn update_settings(store: &InMemoryStore, edit: impl FnOnce(&mut SettingsRecord)) {
    store
        .modify(SettingsRecord::defaults(now()), |mut settings| {
            edit(&mut settings);
            Ok::<_, RepositoryError>(settings)
        })
        .expect("settings saved");
}

pub(super) struct UnavailableStore;

fn offline() -> RepositoryError {
    RepositoryError::Unavailable("database offline".to_string())
}

impl ApplicationRepository for UnavailableStore {
    fn insert_checked<E, F>(
        &self,
        _record: ApplicationRecord,
        _admit: F,
    ) -> Result<ApplicationRecord, E>
    where
        F: FnOnce(&[ApplicationRecord]) -> Result<(), E>,
        E: From<RepositoryError>,
    {
        Err(offline().into())
    }

    fn apply_change<E, F>(&self, _id: &ApplicationId, _decide: F) -> Result<StatusChange, E>
    where
        F: FnOnce(&ApplicationRecord) -> Result<StatusChange, E>,
        E: From<RepositoryError>,
    {
        Err(offline().into())
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(offline())
    }

    fn list(
        &self,
        _status: Option<ApplicationStatus>,
    ) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        Err(offline())
    }
}

impl SettingsRepository for UnavailableStore {
    fn get_or_create(&self, _defaults: SettingsRecord) -> Result<SettingsRecord, RepositoryError> {
        Err(offline())
    }

    fn modify<E, F>(&self, _defaults: SettingsRecord, _edit: F) -> Result<SettingsRecord, E>
    where
        F: FnOnce(SettingsRecord) -> Result<SettingsRecord, E>,
        E: From<RepositoryError>,
    {
        Err(offline().into())
    }
}

pub(super) fn authority() -> Arc<TokenAuthority> {
    Arc::new(TokenAuthority::new(TEST_SECRET, Duration::hours(24)))
}

/// `Authorization` header value for a freshly issued token.
pub(super) fn bearer(role: UserRole, email: &str) -> String {
    let user = UserRecord {
        id: UserId(format!("user-{}", role.label())),
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: String::new(),
        role,
        status: UserStatus::Active,
        joined_at: Utc::now(),
    };
    let issued = authority().issue(&user, Utc::now()).expect("token issued");
    format!("Bearer {}", issued.token)
}

pub(super) fn router_with_service(
    service: ApplicationService<InMemoryStore, InMemoryStore>,
) -> Router {
    application_router(Arc::new(service)).layer(Extension(authority()))
}

pub(super) fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: &Value,
) -> Request<axum::body::Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder
        .body(axum::body::Body::from(
            serde_json::to_vec(body).expect("serializable body"),
        ))
        .expect("request builds")
}

pub(super) fn get_request(uri: &str, token: Option<&str>) -> Request<axum::body::Body> {
    let mut builder = Request::get(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, token);
    }
    builder
        .body(axum::body::Body::empty())
        .expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn assert_error(response: Response, status: StatusCode, kind: &str) {
    assert_eq!(response.status(), status);
    let payload = read_json_body(response).await;
    assert_eq!(payload["kind"], kind, "unexpected payload {payload}");
}
