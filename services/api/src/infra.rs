use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use hostel_desk::auth::{AuthService, TokenAuthority};
use hostel_desk::hostel::applications::ApplicationService;
use hostel_desk::hostel::hostels::HostelService;
use hostel_desk::hostel::report::ReportService;
use hostel_desk::hostel::settings::SettingsService;
use hostel_desk::hostel::users::UserService;
use hostel_desk::store::InMemoryStore;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Every domain service wired against one shared store.
pub(crate) struct Services {
    pub(crate) authority: Arc<TokenAuthority>,
    pub(crate) auth: Arc<AuthService<InMemoryStore>>,
    pub(crate) applications: Arc<ApplicationService<InMemoryStore, InMemoryStore>>,
    pub(crate) hostels: Arc<HostelService<InMemoryStore>>,
    pub(crate) users: Arc<UserService<InMemoryStore>>,
    pub(crate) settings: Arc<SettingsService<InMemoryStore>>,
    pub(crate) reports: Arc<ReportService<InMemoryStore, InMemoryStore>>,
}

impl Services {
    pub(crate) fn new(store: Arc<InMemoryStore>, authority: Arc<TokenAuthority>) -> Self {
        Self {
            auth: Arc::new(AuthService::new(store.clone(), authority.clone())),
            applications: Arc::new(ApplicationService::new(store.clone(), store.clone())),
            hostels: Arc::new(HostelService::new(store.clone())),
            users: Arc::new(UserService::new(store.clone())),
            settings: Arc::new(SettingsService::new(store.clone())),
            reports: Arc::new(ReportService::new(store.clone(), store)),
            authority,
        }
    }
}
