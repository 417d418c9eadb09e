use std::sync::Arc;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use super::extract::AuthUser;
use super::service::{AuthService, LoginRequest, LoginResponse};
use crate::error::AppError;
use crate::extract::JsonBody;
use crate::hostel::users::{UserRepository, UserView};

pub fn auth_router<R>(service: Arc<AuthService<R>>) -> Router
where
    R: UserRepository + 'static,
{
    Router::new()
        .route("/api/auth/login", post(login_handler::<R>))
        .route("/api/auth/me", get(me_handler::<R>))
        .with_state(service)
}

async fn login_handler<R>(
    State(service): State<Arc<AuthService<R>>>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError>
where
    R: UserRepository + 'static,
{
    // Argon2 verification is CPU-bound; keep it off the async workers.
    let response =
        tokio::task::spawn_blocking(move || service.login(request, Utc::now())).await??;
    Ok(Json(response))
}

async fn me_handler<R>(
    State(service): State<Arc<AuthService<R>>>,
    user: AuthUser,
) -> Result<Json<UserView>, AppError>
where
    R: UserRepository + 'static,
{
    Ok(Json(service.profile(&user.user_id)?))
}
