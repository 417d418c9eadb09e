use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use super::service::ReportService;
use super::summary::DEFAULT_RECENT_LIMIT;
use super::views::{DashboardStats, MonthlyBucket, ProgramShare, ReportStats};
use crate::auth::StaffUser;
use crate::error::AppError;
use crate::hostel::applications::{ApplicationRecord, ApplicationRepository};
use crate::hostel::hostels::{HostelRepository, OccupancyEntry};

const MAX_RECENT_LIMIT: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecentQuery {
    limit: Option<usize>,
}

/// Dashboard and report endpoints. All of them are staff-only.
pub fn report_router<A, H>(service: Arc<ReportService<A, H>>) -> Router
where
    A: ApplicationRepository + 'static,
    H: HostelRepository + 'static,
{
    Router::new()
        .route("/api/dashboard/stats", get(dashboard_handler::<A, H>))
        .route(
            "/api/dashboard/recent-applications",
            get(recent_handler::<A, H>),
        )
        .route(
            "/api/dashboard/hostel-occupancy",
            get(occupancy_handler::<A, H>),
        )
        .route("/api/reports/stats", get(stats_handler::<A, H>))
        .route("/api/reports/programs", get(programs_handler::<A, H>))
        .route("/api/reports/monthly-trends", get(trends_handler::<A, H>))
        .route("/api/reports/applications.csv", get(export_handler::<A, H>))
        .with_state(service)
}

async fn dashboard_handler<A, H>(
    State(service): State<Arc<ReportService<A, H>>>,
    _staff: StaffUser,
) -> Result<Json<DashboardStats>, AppError>
where
    A: ApplicationRepository + 'static,
    H: HostelRepository + 'static,
{
    Ok(Json(service.dashboard()?))
}

async fn recent_handler<A, H>(
    State(service): State<Arc<ReportService<A, H>>>,
    _staff: StaffUser,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<ApplicationRecord>>, AppError>
where
    A: ApplicationRepository + 'static,
    H: HostelRepository + 'static,
{
    let limit = query
        .limit
        .unwrap_or(DEFAULT_RECENT_LIMIT)
        .min(MAX_RECENT_LIMIT);
    Ok(Json(service.recent(limit)?))
}

async fn occupancy_handler<A, H>(
    State(service): State<Arc<ReportService<A, H>>>,
    _staff: StaffUser,
) -> Result<Json<Vec<OccupancyEntry>>, AppError>
where
    A: ApplicationRepository + 'static,
    H: HostelRepository + 'static,
{
    Ok(Json(service.occupancy()?))
}

async fn stats_handler<A, H>(
    State(service): State<Arc<ReportService<A, H>>>,
    _staff: StaffUser,
) -> Result<Json<ReportStats>, AppError>
where
    A: ApplicationRepository + 'static,
    H: HostelRepository + 'static,
{
    Ok(Json(service.stats()?))
}

async fn programs_handler<A, H>(
    State(service): State<Arc<ReportService<A, H>>>,
    _staff: StaffUser,
) -> Result<Json<Vec<ProgramShare>>, AppError>
where
    A: ApplicationRepository + 'static,
    H: HostelRepository + 'static,
{
    Ok(Json(service.programs()?))
}

async fn trends_handler<A, H>(
    State(service): State<Arc<ReportService<A, H>>>,
    _staff: StaffUser,
) -> Result<Json<Vec<MonthlyBucket>>, AppError>
where
    A: ApplicationRepository + 'static,
    H: HostelRepository + 'static,
{
    Ok(Json(service.monthly_trends()?))
}

async fn export_handler<A, H>(
    State(service): State<Arc<ReportService<A, H>>>,
    _staff: StaffUser,
) -> Result<impl IntoResponse, AppError>
where
    A: ApplicationRepository + 'static,
    H: HostelRepository + 'static,
{
    let body = service.export_csv()?;
    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8"),
            (CONTENT_DISPOSITION, "attachment; filename=\"applications.csv\""),
        ],
        body,
    ))
}
