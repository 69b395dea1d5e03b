use axum::{
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use chrono::Local;
use serde::Serialize;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Uniform body of every response.
///
/// Failure envelopes never carry data; use [`Envelope::failure`] for them.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T: Serialize = ()> {
    success: bool,
    message: String,
    data: Option<T>,
    timestamp: String,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            timestamp: now(),
        }
    }

    /// Renders the envelope as pretty-printed UTF-8 JSON with `status`.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        match serde_json::to_vec_pretty(&self) {
            Ok(body) => (
                status,
                [(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
                body,
            )
                .into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Failed to serialize response envelope");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    [(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))],
                    serialization_failure_body(),
                )
                    .into_response()
            }
        }
    }
}

impl Envelope {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            timestamp: now(),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        self.into_response_with(StatusCode::OK)
    }
}

/// Hand-built failure envelope for when serde itself fails.
fn serialization_failure_body() -> String {
    format!(
        "{{\n  \"success\": false,\n  \"message\": \"Internal error while rendering the response\",\n  \"data\": null,\n  \"timestamp\": \"{}\"\n}}",
        now()
    )
}

fn now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
