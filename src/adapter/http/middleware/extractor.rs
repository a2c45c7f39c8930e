use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::application::app_error::{AppError, AppResult};

/// Identity of the session owner, inserted by the auth middleware.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub name: String,
    pub email: String,
    pub picture: Option<String>,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> AppResult<Self> {
        match parts.extensions.get::<AuthUser>().cloned() {
            Some(user) => Ok(user),
            None => Err(AppError::InvalidCredentials),
        }
    }
}
