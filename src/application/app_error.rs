use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Google authentication not configured")]
    ProviderNotConfigured,
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    #[error("Invalid Credentials")]
    InvalidCredentials,
    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
    #[error("identity provider request failed: {0}")]
    ProviderRequest(#[from] reqwest::Error),
}

pub type AppResult<T> = Result<T, AppError>;
