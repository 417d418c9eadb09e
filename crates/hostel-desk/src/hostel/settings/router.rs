use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;

use super::{SettingsPatch, SettingsRecord, SettingsRepository, SettingsService};
use crate::auth::{AdminUser, AuthUser};
use crate::error::AppError;
use crate::extract::JsonBody;

pub fn settings_router<S>(service: Arc<SettingsService<S>>) -> Router
where
    S: SettingsRepository + 'static,
{
    Router::new()
        .route(
            "/api/settings",
            get(current_handler::<S>).put(update_handler::<S>),
        )
        .with_state(service)
}

async fn current_handler<S>(
    State(service): State<Arc<SettingsService<S>>>,
    _user: AuthUser,
) -> Result<Json<SettingsRecord>, AppError>
where
    S: SettingsRepository + 'static,
{
    Ok(Json(service.current(Utc::now())?))
}

async fn update_handler<S>(
    State(service): State<Arc<SettingsService<S>>>,
    _admin: AdminUser,
    JsonBody(patch): JsonBody<SettingsPatch>,
) -> Result<Json<SettingsRecord>, AppError>
where
    S: SettingsRepository + 'static,
{
    Ok(Json(service.update(patch, Utc::now())?))
}
