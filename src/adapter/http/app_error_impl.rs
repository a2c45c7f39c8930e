use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::application::app_error::AppError;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::ProviderNotConfigured => (
                StatusCode::BAD_REQUEST,
                Some("Google authentication not configured".to_string()),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Some("Invalid Credentials".to_string()),
            ),
            AppError::InvalidConfig(_) => (StatusCode::BAD_REQUEST, None),
            // Provider failures carry exchange detail that must not reach
            // the browser; the generic reason phrase is all it gets.
            AppError::AuthenticationFailed(_) | AppError::ProviderRequest(_) => {
                (StatusCode::UNAUTHORIZED, None)
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, None),
        };

        let message = match message {
            Some(msg) => msg,
            None => status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string(),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
