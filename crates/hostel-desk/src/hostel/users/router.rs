use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;

use super::domain::{UserDraft, UserId, UserStatus, UserView};
use super::repository::UserRepository;
use super::service::UserService;
use crate::auth::AdminUser;
use crate::error::AppError;
use crate::extract::JsonBody;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct StatusUpdate {
    status: UserStatus,
}

/// Admin-only account management endpoints.
pub fn user_router<R>(service: Arc<UserService<R>>) -> Router
where
    R: UserRepository + 'static,
{
    Router::new()
        .route("/api/users", get(list_handler::<R>).post(create_handler::<R>))
        .route("/api/users/:user_id/status", put(status_handler::<R>))
        .with_state(service)
}

async fn list_handler<R>(
    State(service): State<Arc<UserService<R>>>,
    _admin: AdminUser,
) -> Result<Json<Vec<UserView>>, AppError>
where
    R: UserRepository + 'static,
{
    Ok(Json(service.list()?))
}

async fn create_handler<R>(
    State(service): State<Arc<UserService<R>>>,
    _admin: AdminUser,
    JsonBody(draft): JsonBody<UserDraft>,
) -> Result<(StatusCode, Json<UserView>), AppError>
where
    R: UserRepository + 'static,
{
    let view = tokio::task::spawn_blocking(move || service.create(draft, Utc::now())).await??;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn status_handler<R>(
    State(service): State<Arc<UserService<R>>>,
    _admin: AdminUser,
    Path(user_id): Path<String>,
    JsonBody(update): JsonBody<StatusUpdate>,
) -> Result<Json<UserView>, AppError>
where
    R: UserRepository + 'static,
{
    Ok(Json(service.set_status(&UserId(user_id), update.status)?))
}
