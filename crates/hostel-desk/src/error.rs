use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::hostel::applications::ApplicationServiceError;
use crate::hostel::hostels::HostelError;
use crate::hostel::import::ImportError;
use crate::hostel::report::ReportError;
use crate::hostel::settings::SettingsError;
use crate::hostel::users::UserServiceError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use std::fmt;

/// Stable, machine-readable classification attached to every error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Unauthorized,
    Forbidden,
    Conflict,
    InvalidState,
    Store,
    Internal,
}

impl ErrorKind {
    pub const fn label(self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::Conflict => "conflict",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::Store => "store",
            ErrorKind::Internal => "internal",
        }
    }

    pub const fn status(self) -> StatusCode {
        match self {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Conflict | ErrorKind::InvalidState => StatusCode::CONFLICT,
            ErrorKind::Store | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Import(ImportError),
    BadRequest(String),
    Auth(AuthError),
    Applications(ApplicationServiceError),
    Hostels(HostelError),
    Users(UserServiceError),
    Settings(SettingsError),
    Reports(ReportError),
    Task(tokio::task::JoinError),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Task(_) => ErrorKind::Internal,
            AppError::Import(_) | AppError::BadRequest(_) => ErrorKind::Validation,
            AppError::Auth(err) => err.kind(),
            AppError::Applications(err) => err.kind(),
            AppError::Hostels(err) => err.kind(),
            AppError::Users(err) => err.kind(),
            AppError::Settings(err) => err.kind(),
            AppError::Reports(err) => err.kind(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {err}"),
            AppError::Telemetry(err) => write!(f, "telemetry error: {err}"),
            AppError::Io(err) => write!(f, "io error: {err}"),
            AppError::Import(err) => write!(f, "import error: {err}"),
            AppError::BadRequest(message) => write!(f, "{message}"),
            AppError::Auth(err) => write!(f, "{err}"),
            AppError::Applications(err) => write!(f, "{err}"),
            AppError::Hostels(err) => write!(f, "{err}"),
            AppError::Users(err) => write!(f, "{err}"),
            AppError::Settings(err) => write!(f, "{err}"),
            AppError::Reports(err) => write!(f, "{err}"),
            AppError::Task(err) => write!(f, "background task failed: {err}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::BadRequest(_) => None,
            AppError::Auth(err) => Some(err),
            AppError::Applications(err) => Some(err),
            AppError::Hostels(err) => Some(err),
            AppError::Users(err) => Some(err),
            AppError::Settings(err) => Some(err),
            AppError::Reports(err) => Some(err),
            AppError::Task(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = kind.status();
        if status.is_server_error() {
            tracing::error!(kind = kind.label(), error = %self, "request failed");
        }

        let body = Json(json!({
            "message": self.to_string(),
            "kind": kind.label(),
        }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<ImportError> for AppError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<AuthError> for AppError {
    fn from(value: AuthError) -> Self {
        Self::Auth(value)
    }
}

impl From<ApplicationServiceError> for AppError {
    fn from(value: ApplicationServiceError) -> Self {
        Self::Applications(value)
    }
}

impl From<HostelError> for AppError {
    fn from(value: HostelError) -> Self {
        Self::Hostels(value)
    }
}

impl From<UserServiceError> for AppError {
    fn from(value: UserServiceError) -> Self {
        Self::Users(value)
    }
}

impl From<SettingsError> for AppError {
    fn from(value: SettingsError) -> Self {
        Self::Settings(value)
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        Self::Reports(value)
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Task(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hostel::applications::ApplicationId;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 4096)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn not_found_renders_message_and_kind() {
        let error = AppError::from(ApplicationServiceError::NotFound(ApplicationId(
            "app-404".to_string(),
        )));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let payload = body_json(response).await;
        assert_eq!(payload["kind"], "not_found");
        assert!(payload["message"]
            .as_str()
            .expect("message is a string")
            .contains("app-404"));
    }

    #[tokio::test]
    async fn bad_request_is_a_validation_error() {
        let response = AppError::BadRequest("missing field `name`".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let payload = body_json(response).await;
        assert_eq!(payload["kind"], "validation");
        assert_eq!(payload["message"], "missing field `name`");
    }

    #[test]
    fn invalid_state_maps_to_conflict_status() {
        assert_eq!(ErrorKind::InvalidState.status(), StatusCode::CONFLICT);
        assert_eq!(ErrorKind::Store.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
