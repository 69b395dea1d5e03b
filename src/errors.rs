use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::envelope::Envelope;
use crate::logging::ValidationEvent;
use crate::routes::validation::Action;
use crate::validators::ValidationError;

/// Request-level failures. Every variant renders as an envelope with
/// `success = false` and no data.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Action not found. Available actions: {}", Action::list())]
    UnknownAction(String),

    #[error("Unsupported HTTP method. Use GET")]
    UnsupportedMethod(String),

    #[error("Invalid query string: {0}")]
    InvalidQuery(String),

    #[error("Route not found: {0}. Use /api?action=")]
    UnknownRoute(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownAction(_) => StatusCode::NOT_FOUND,
            AppError::UnknownRoute(_) => StatusCode::NOT_FOUND,
            AppError::UnsupportedMethod(_) => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    fn event(&self) -> ValidationEvent {
        match self {
            AppError::MissingParameter(_) => ValidationEvent::MissingParameter,
            AppError::InvalidQuery(_) => ValidationEvent::InvalidQuery,
            AppError::UnknownAction(_) => ValidationEvent::UnknownAction,
            AppError::UnknownRoute(_) => ValidationEvent::UnknownRoute,
            AppError::UnsupportedMethod(_) => ValidationEvent::UnsupportedMethod,
        }
    }

    fn log_error(&self) {
        let status_code = self.status_code();
        match self {
            AppError::MissingParameter(parameter) => {
                crate::log_validation_event!(
                    self.event(),
                    parameter,
                    status_code = %status_code,
                    "Request rejected: missing parameter"
                );
            }
            AppError::UnknownAction(action) => {
                crate::log_validation_event!(
                    self.event(),
                    action = %action.escape_debug(),
                    status_code = %status_code,
                    "Request rejected: unknown action"
                );
            }
            AppError::UnsupportedMethod(method) => {
                crate::log_validation_event!(
                    self.event(),
                    method = %method,
                    status_code = %status_code,
                    "Request rejected: unsupported method"
                );
            }
            AppError::UnknownRoute(path) => {
                crate::log_validation_event!(
                    self.event(),
                    path = %path.escape_debug(),
                    status_code = %status_code,
                    "Request rejected: unknown route"
                );
            }
            AppError::InvalidQuery(reason) => {
                crate::log_validation_event!(
                    self.event(),
                    reason = %reason,
                    status_code = %status_code,
                    "Request rejected: malformed query string"
                );
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log_error();

        let status = self.status_code();
        Envelope::failure(self.to_string()).into_response_with(status)
    }
}

impl From<ValidationError> for AppError {
    fn from(error: ValidationError) -> Self {
        match error {
            ValidationError::MissingParameter(parameter) => AppError::MissingParameter(parameter),
        }
    }
}
