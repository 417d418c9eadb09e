use crate::cli::ServeArgs;
use crate::infra::{AppState, Services};
use crate::routes::api_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use hostel_desk::auth::TokenAuthority;
use hostel_desk::config::AppConfig;
use hostel_desk::error::AppError;
use hostel_desk::store::InMemoryStore;
use hostel_desk::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryStore::new());
    let authority = Arc::new(TokenAuthority::from_config(&config.auth));
    let services = Services::new(store, authority);

    if let Some(admin) = &config.auth.bootstrap_admin {
        let account = services
            .users
            .ensure_admin(&admin.email, &admin.password, Utc::now())?;
        info!(user_id = %account.id, email = %account.email, "bootstrap admin available");
    }

    let app = api_router(&services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "hostel administration service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
