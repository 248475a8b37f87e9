//! Maps `HealthHubError` onto HTTP responses.
//!
//! Body shape: `{ "message": string, "code": string }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use healthhub_core::error::{ClientCode, HealthHubError};

#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub HealthHubError);

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub code: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.client_code() {
            ClientCode::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ClientCode::AggregationFailure
            | ClientCode::InvalidTimeWindow
            | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: self.0.to_string(),
            code: self.0.client_code().as_str(),
        };
        (self.status(), Json(body)).into_response()
    }
}
