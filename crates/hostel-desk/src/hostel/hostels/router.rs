use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};

use super::domain::{HostelDraft, HostelId, HostelPatch, HostelRecord};
use super::{HostelRepository, HostelService};
use crate::auth::{AdminUser, AuthUser};
use crate::error::AppError;
use crate::extract::JsonBody;

pub fn hostel_router<R>(service: Arc<HostelService<R>>) -> Router
where
    R: HostelRepository + 'static,
{
    Router::new()
        .route(
            "/api/hostels",
            get(list_handler::<R>).post(create_handler::<R>),
        )
        .route("/api/hostels/:hostel_id", put(update_handler::<R>))
        .with_state(service)
}

async fn list_handler<R>(
    State(service): State<Arc<HostelService<R>>>,
    _user: AuthUser,
) -> Result<Json<Vec<HostelRecord>>, AppError>
where
    R: HostelRepository + 'static,
{
    Ok(Json(service.list()?))
}

async fn create_handler<R>(
    State(service): State<Arc<HostelService<R>>>,
    _admin: AdminUser,
    JsonBody(draft): JsonBody<HostelDraft>,
) -> Result<(StatusCode, Json<HostelRecord>), AppError>
where
    R: HostelRepository + 'static,
{
    let record = service.create(draft)?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_handler<R>(
    State(service): State<Arc<HostelService<R>>>,
    _admin: AdminUser,
    Path(hostel_id): Path<String>,
    JsonBody(patch): JsonBody<HostelPatch>,
) -> Result<Json<HostelRecord>, AppError>
where
    R: HostelRepository + 'static,
{
    Ok(Json(service.update(&HostelId(hostel_id), patch)?))
}
