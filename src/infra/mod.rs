use std::sync::Arc;

use chrono::Duration;

use crate::adapter::db::session::PgSessionStore;
use crate::adapter::memory::pending::MemoryPendingLoginStore;
use crate::adapter::memory::session::MemorySessionStore;
use crate::adapter::oauth::google::GoogleOAuthClient;
use crate::application::app_error::AppError;
use crate::application::interface::provider::IdentityProvider;
use crate::application::interface::store::{PendingLoginStore, SessionStore};
use crate::infra::config::AppConfig;
use crate::infra::db::init_db;
use crate::infra::state::AppState;

pub mod app;
pub mod config;
pub mod db;
pub mod setup;
pub mod state;

pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let lifetime = Duration::seconds(config.session.max_lifetime);
    let session_store: Arc<dyn SessionStore> = match config.session_store.backend.as_str() {
        "memory" => Arc::new(MemorySessionStore::new(lifetime)),
        "postgres" => {
            let db = config.db.as_ref().ok_or_else(|| {
                AppError::InvalidConfig(
                    "a [db] section is required for the postgres session store".to_string(),
                )
            })?;
            Arc::new(PgSessionStore::new(init_db(db).await?, lifetime))
        }
        other => {
            return Err(
                AppError::InvalidConfig(format!("unknown session store backend: {other}")).into(),
            );
        }
    };
    let pending_logins: Arc<dyn PendingLoginStore> = Arc::new(MemoryPendingLoginStore::new(
        Duration::seconds(config.login.pending_ttl),
    ));
    let provider: Arc<dyn IdentityProvider> =
        Arc::new(GoogleOAuthClient::new(config.google.credentials())?);

    Ok(AppState {
        session_store,
        pending_logins,
        provider,
        config: Arc::new(config.clone()),
    })
}
