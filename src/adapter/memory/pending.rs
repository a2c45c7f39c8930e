use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::Mutex;

use crate::application::app_error::AppResult;
use crate::application::interface::store::PendingLoginStore;
use crate::domain::entities::pending_login::PendingLogin;

/// Correlation-nonce store for logins that are mid-redirect.
///
/// `claim` removes under the mutex, so concurrent callbacks presenting the
/// same state can never both succeed.
pub struct MemoryPendingLoginStore {
    ttl: Duration,
    entries: Mutex<HashMap<String, PendingLogin>>,
}

impl MemoryPendingLoginStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl PendingLoginStore for MemoryPendingLoginStore {
    async fn insert(&self, pending: PendingLogin) -> AppResult<()> {
        let now = Utc::now();
        let mut entries = self.entries.lock();
        // Abandoned logins never get claimed; prune them here so the map
        // stays bounded by active traffic.
        entries.retain(|_, entry| !entry.is_expired(self.ttl, now));
        entries.insert(pending.state.clone(), pending);
        Ok(())
    }

    async fn claim(&self, state: &str) -> AppResult<Option<PendingLogin>> {
        let now = Utc::now();
        let claimed = self.entries.lock().remove(state);
        Ok(claimed.filter(|entry| !entry.is_expired(self.ttl, now)))
    }
}
