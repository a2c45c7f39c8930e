use std::sync::Arc;

use tracing::info;

use crate::application::app_error::AppResult;
use crate::application::dto::auth::SessionTokenDTO;
use crate::application::interface::store::SessionStore;
use crate::domain::entities::session::Session;
use crate::domain::entities::token::SessionToken;

/// Resolves a cookie token against the session store.
///
/// An expired session and an unknown token are indistinguishable here; both
/// come back as `None` and collapse to an unauthorized response upstream.
#[derive(Clone)]
pub struct ValidateSessionInteractor {
    session_store: Arc<dyn SessionStore>,
}

impl ValidateSessionInteractor {
    pub fn new(session_store: Arc<dyn SessionStore>) -> Self {
        Self { session_store }
    }

    pub async fn execute(&self, dto: SessionTokenDTO) -> AppResult<Option<Session>> {
        let token = SessionToken::from(dto.token);
        self.session_store.lookup(&token).await
    }
}

#[derive(Clone)]
pub struct LogoutInteractor {
    session_store: Arc<dyn SessionStore>,
}

impl LogoutInteractor {
    pub fn new(session_store: Arc<dyn SessionStore>) -> Self {
        Self { session_store }
    }

    pub async fn execute(&self, dto: SessionTokenDTO) -> AppResult<()> {
        let token = SessionToken::from(dto.token);
        self.session_store.destroy(&token).await?;
        info!("Session terminated");
        Ok(())
    }
}
