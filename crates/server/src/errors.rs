use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

use crate::metrics::SHIPS_REJECTED_TOTAL;

/// Code reported for requests whose body or query string cannot be decoded.
pub const UNDECODABLE_REQUEST: u16 = 1002;

/// JSON error body: `{"error": title, "message": detail, "code": code}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
    pub code: u16,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail, code: 0 }
    }

    pub fn with_code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request", Some(detail.into())).with_code(UNDECODABLE_REQUEST)
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        if self.status == StatusCode::BAD_REQUEST {
            SHIPS_REJECTED_TOTAL.inc();
        }
        let body = serde_json::json!({
            "error": self.title,
            "message": self.detail.unwrap_or_default(),
            "code": self.code,
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let code = e.code();
        let (status, title) = match code {
            1001 => (StatusCode::BAD_REQUEST, "Bad Request"),
            1002 => (StatusCode::BAD_REQUEST, "Validation Error"),
            1003 => (StatusCode::NOT_FOUND, "Not Found"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };
        if status.is_server_error() {
            error!(err = %e, code, "ship request failed");
        } else {
            warn!(err = %e, code, "ship request refused");
        }
        Self::new(status, title, Some(e.to_string())).with_code(code)
    }
}

impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for JsonApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage unavailable: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn service_errors_map_to_status() {
        let cases = [
            (ServiceError::MalformedId("abc".into()), StatusCode::BAD_REQUEST, 1001),
            (ServiceError::Validation("speed".into()), StatusCode::BAD_REQUEST, 1002),
            (ServiceError::Model(ModelError::Validation("year".into())), StatusCode::BAD_REQUEST, 1002),
            (ServiceError::not_found("ship"), StatusCode::NOT_FOUND, 1003),
            (ServiceError::Db("down".into()), StatusCode::INTERNAL_SERVER_ERROR, 1200),
        ];
        for (err, status, code) in cases {
            let api = JsonApiError::from(err);
            assert_eq!(api.status, status);
            assert_eq!(api.code, code);
        }
    }

    #[test]
    fn response_carries_status() {
        let res = JsonApiError::bad_request("nope").into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
