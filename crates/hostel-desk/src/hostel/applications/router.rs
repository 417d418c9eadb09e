use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;

use super::domain::{ApplicationDraft, ApplicationId, ApplicationRecord, ApplicationStatus};
use super::repository::ApplicationRepository;
use super::service::ApplicationService;
use crate::auth::{AuthError, AuthUser, StaffUser};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::hostel::settings::SettingsRepository;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct StatusUpdate {
    pub(crate) status: ApplicationStatus,
}

/// Router builder exposing intake, listing, and review endpoints.
pub fn application_router<R, S>(service: Arc<ApplicationService<R, S>>) -> Router
where
    R: ApplicationRepository + 'static,
    S: SettingsRepository + 'static,
{
    Router::new()
        .route(
            "/api/applications",
            get(list_handler::<R, S>).post(submit_handler::<R, S>),
        )
        .route("/api/applications/:application_id", get(fetch_handler::<R, S>))
        .route(
            "/api/applications/:application_id/status",
            put(status_handler::<R, S>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<R, S>(
    State(service): State<Arc<ApplicationService<R, S>>>,
    _staff: StaffUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<ApplicationRecord>>, AppError>
where
    R: ApplicationRepository + 'static,
    S: SettingsRepository + 'static,
{
    let status = match query.status.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => Some(
            raw.parse::<ApplicationStatus>()
                .map_err(|err| AppError::BadRequest(err.to_string()))?,
        ),
    };
    Ok(Json(service.list(status)?))
}

pub(crate) async fn submit_handler<R, S>(
    State(service): State<Arc<ApplicationService<R, S>>>,
    _user: AuthUser,
    JsonBody(draft): JsonBody<ApplicationDraft>,
) -> Result<(StatusCode, Json<ApplicationRecord>), AppError>
where
    R: ApplicationRepository + 'static,
    S: SettingsRepository + 'static,
{
    let record = service.submit(draft, Utc::now())?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Staff may read any application; students only their own.
pub(crate) async fn fetch_handler<R, S>(
    State(service): State<Arc<ApplicationService<R, S>>>,
    user: AuthUser,
    Path(application_id): Path<String>,
) -> Result<Json<ApplicationRecord>, AppError>
where
    R: ApplicationRepository + 'static,
    S: SettingsRepository + 'static,
{
    let record = service.get(&ApplicationId(application_id))?;
    if !user.is_staff() && !record.email.eq_ignore_ascii_case(&user.email) {
        return Err(AuthError::Forbidden {
            required: "admin or warden",
        }
        .into());
    }
    Ok(Json(record))
}

pub(crate) async fn status_handler<R, S>(
    State(service): State<Arc<ApplicationService<R, S>>>,
    StaffUser(reviewer): StaffUser,
    Path(application_id): Path<String>,
    JsonBody(update): JsonBody<StatusUpdate>,
) -> Result<Json<ApplicationRecord>, AppError>
where
    R: ApplicationRepository + 'static,
    S: SettingsRepository + 'static,
{
    let record = service.set_status(
        &ApplicationId(application_id),
        update.status,
        &reviewer.email,
        Utc::now(),
    )?;
    Ok(Json(record))
}
