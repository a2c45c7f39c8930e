use std::sync::Arc;

use tracing::{info, warn};

use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::auth::{
    AuthorizationRedirectDTO, BeginLoginDTO, CompleteLoginDTO, LoginCompletedDTO,
};
use crate::application::interface::provider::IdentityProvider;
use crate::application::interface::store::{PendingLoginStore, SessionStore};
use crate::domain::entities::pending_login::PendingLogin;
use crate::domain::entities::token::generate_login_state;

const DEFAULT_RETURN_PATH: &str = "/dashboard";

/// Only relative paths may be used as a post-login target; anything else
/// (absolute URLs, protocol-relative `//host` forms) falls back to the
/// dashboard to keep the redirect inside the application.
fn sanitize_return_to(requested: Option<String>) -> String {
    match requested {
        Some(path) if path.starts_with('/') && !path.starts_with("//") => path,
        _ => DEFAULT_RETURN_PATH.to_string(),
    }
}

#[derive(Clone)]
pub struct BeginLoginInteractor {
    provider: Arc<dyn IdentityProvider>,
    pending_logins: Arc<dyn PendingLoginStore>,
}

impl BeginLoginInteractor {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        pending_logins: Arc<dyn PendingLoginStore>,
    ) -> Self {
        Self {
            provider,
            pending_logins,
        }
    }

    pub async fn execute(&self, dto: BeginLoginDTO) -> AppResult<AuthorizationRedirectDTO> {
        if !self.provider.is_configured() {
            warn!("Login attempted without provider credentials");
            return Err(AppError::ProviderNotConfigured);
        }
        let return_to = sanitize_return_to(dto.return_to);
        let state = generate_login_state();
        let location = self.provider.authorization_url(&state, &dto.callback_url)?;
        self.pending_logins
            .insert(PendingLogin::new(state, return_to))
            .await?;
        Ok(AuthorizationRedirectDTO { location })
    }
}

#[derive(Clone)]
pub struct CompleteLoginInteractor {
    provider: Arc<dyn IdentityProvider>,
    pending_logins: Arc<dyn PendingLoginStore>,
    session_store: Arc<dyn SessionStore>,
}

impl CompleteLoginInteractor {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        pending_logins: Arc<dyn PendingLoginStore>,
        session_store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            provider,
            pending_logins,
            session_store,
        }
    }

    pub async fn execute(&self, dto: CompleteLoginDTO) -> AppResult<LoginCompletedDTO> {
        let state = dto
            .state
            .ok_or_else(|| AppError::AuthenticationFailed("missing state parameter".to_string()))?;
        // The nonce is consumed before anything else so a failed callback
        // still burns it.
        let pending = self
            .pending_logins
            .claim(&state)
            .await?
            .ok_or_else(|| {
                AppError::AuthenticationFailed("unknown or expired login state".to_string())
            })?;
        if let Some(error) = dto.error {
            return Err(AppError::AuthenticationFailed(format!(
                "provider denied the request: {error}"
            )));
        }
        let code = dto
            .code
            .ok_or_else(|| AppError::AuthenticationFailed("missing authorization code".to_string()))?;
        let claim = self.provider.exchange_code(&code, &dto.callback_url).await?;
        let email = claim.email.clone();
        let session_id = self.session_store.create(claim).await?;
        info!("Session established for {email}");
        Ok(LoginCompletedDTO {
            session_id: session_id.to_string(),
            return_to: pending.return_to,
        })
    }
}
