//! HTTP Error Handling
//!
//! 所有错误都以 failure envelope 返回：`{ "status": "failure", "message": ... }`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{ApplicationError, ResponseEnvelope};

/// API 错误
#[derive(Debug)]
pub enum ApiError {
    /// 客户端请求不完整或格式错误，不会调用账本
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "Bad request");
                (StatusCode::BAD_REQUEST, msg)
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        (status, Json(ResponseEnvelope::failure(message))).into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        match e {
            ApplicationError::MissingParameter { .. } => ApiError::BadRequest(e.to_string()),
            ApplicationError::InvalidPayload(_) => ApiError::Internal(e.to_string()),
        }
    }
}
