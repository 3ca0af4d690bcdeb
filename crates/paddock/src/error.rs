use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use paddock_core::f1::{SeasonError, TransformError};
use serde_json::json;

/// Failure of a single service operation. None of these stop the server.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Network failure, timeout or non-success status from the upstream API
    #[error("Upstream API unavailable: {message}")]
    UpstreamUnavailable { status: Option<u16>, message: String },

    /// The upstream answered, but not with the shape we need
    #[error("Malformed upstream data: {0}")]
    MalformedUpstreamData(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    pub fn kind(&self) -> &'static str {
        match self {
            Error::UpstreamUnavailable { .. } => "UpstreamUnavailable",
            Error::MalformedUpstreamData(_) => "MalformedUpstreamData",
            Error::InvalidRequest(_) => "InvalidRequest",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
            Error::MalformedUpstreamData(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Error::UpstreamUnavailable { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<TransformError> for Error {
    fn from(err: TransformError) -> Self {
        Error::MalformedUpstreamData(err.to_string())
    }
}

impl From<SeasonError> for Error {
    fn from(err: SeasonError) -> Self {
        Error::InvalidRequest(err.to_string())
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("{}: {}", self.kind(), self);
        }

        let body = Json(json!({
            "error": {
                "kind": self.kind(),
                "message": self.to_string(),
                "upstream_status": self.upstream_status(),
            }
        }));

        (status, body).into_response()
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = std::result::Result<T, Error>;
