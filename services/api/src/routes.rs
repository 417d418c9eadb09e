use crate::infra::{AppState, Services};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json, Router};
use hostel_desk::auth::auth_router;
use hostel_desk::hostel::applications::application_router;
use hostel_desk::hostel::hostels::hostel_router;
use hostel_desk::hostel::report::report_router;
use hostel_desk::hostel::settings::settings_router;
use hostel_desk::hostel::users::user_router;
use serde_json::json;

/// Every domain router plus the operational endpoints. The token authority is attached as an
/// extension so the auth extractors can verify bearer tokens.
pub(crate) fn api_router(services: &Services) -> Router {
    Router::new()
        .merge(auth_router(services.auth.clone()))
        .merge(application_router(services.applications.clone()))
        .merge(hostel_router(services.hostels.clone()))
        .merge(user_router(services.users.clone()))
        .merge(settings_router(services.settings.clone()))
        .merge(report_router(services.reports.clone()))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .layer(Extension(services.authority.clone()))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
