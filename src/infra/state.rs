use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;

use crate::application::app_error::{AppError, AppResult};
use crate::application::interactors::login::{BeginLoginInteractor, CompleteLoginInteractor};
use crate::application::interactors::session::{LogoutInteractor, ValidateSessionInteractor};
use crate::application::interface::provider::IdentityProvider;
use crate::application::interface::store::{PendingLoginStore, SessionStore};
use crate::infra::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub session_store: Arc<dyn SessionStore>,
    pub pending_logins: Arc<dyn PendingLoginStore>,
    pub provider: Arc<dyn IdentityProvider>,
    pub config: Arc<AppConfig>,
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

#[async_trait]
pub trait FromAppState: Sized {
    async fn from_app_state(state: &AppState) -> AppResult<Self>;
}

// BeginLoginInteractor
#[async_trait]
impl FromAppState for BeginLoginInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(BeginLoginInteractor::new(
            state.provider.clone(),
            state.pending_logins.clone(),
        ))
    }
}

impl<S> FromRequestParts<S> for BeginLoginInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> AppResult<Self> {
        let app_state = AppState::from_ref(state);
        BeginLoginInteractor::from_app_state(&app_state).await
    }
}

// CompleteLoginInteractor
#[async_trait]
impl FromAppState for CompleteLoginInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(CompleteLoginInteractor::new(
            state.provider.clone(),
            state.pending_logins.clone(),
            state.session_store.clone(),
        ))
    }
}

impl<S> FromRequestParts<S> for CompleteLoginInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> AppResult<Self> {
        let app_state = AppState::from_ref(state);
        CompleteLoginInteractor::from_app_state(&app_state).await
    }
}

// ValidateSessionInteractor
#[async_trait]
impl FromAppState for ValidateSessionInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(ValidateSessionInteractor::new(state.session_store.clone()))
    }
}

impl<S> FromRequestParts<S> for ValidateSessionInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> AppResult<Self> {
        let app_state = AppState::from_ref(state);
        ValidateSessionInteractor::from_app_state(&app_state).await
    }
}

// LogoutInteractor
#[async_trait]
impl FromAppState for LogoutInteractor {
    async fn from_app_state(state: &AppState) -> AppResult<Self> {
        Ok(LogoutInteractor::new(state.session_store.clone()))
    }
}

impl<S> FromRequestParts<S> for LogoutInteractor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> AppResult<Self> {
        let app_state = AppState::from_ref(state);
        LogoutInteractor::from_app_state(&app_state).await
    }
}
