use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pasta_core::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error("no paste id found, bad URL")]
    MissingId,
    #[error("invalid form: {0}")]
    InvalidForm(String),
    #[error("failed to render page: {0}")]
    Template(#[from] askama::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Service(err) => match err {
                ServiceError::Unauthenticated | ServiceError::Forbidden(_) => {
                    StatusCode::FORBIDDEN
                }
                ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
                ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
                ServiceError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                ServiceError::Unavailable(_) | ServiceError::IdSpaceExhausted(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            AppError::MissingId | AppError::InvalidForm(_) => StatusCode::BAD_REQUEST,
            AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "request failed");
        } else if status == StatusCode::FORBIDDEN {
            warn!(error = %self, "request refused");
        }

        (status, self.to_string()).into_response()
    }
}
