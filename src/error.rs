// src/error.rs
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ErrorResponse;
use crate::services::openrouter::RelayError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Relay(#[from] RelayError),
    #[error("{}", .0.body_text())]
    Rejected(#[from] JsonRejection),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Relay(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Rejected(rejection) => rejection.status(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse { error: self.to_string() };
        (status, Json(body)).into_response()
    }
}
