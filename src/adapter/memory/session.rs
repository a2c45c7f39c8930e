use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::Mutex;

use crate::application::app_error::AppResult;
use crate::application::interface::store::SessionStore;
use crate::domain::entities::claim::IdentityClaim;
use crate::domain::entities::session::Session;
use crate::domain::entities::token::SessionToken;

/// Process-local session store.
///
/// All mutation happens under one mutex, so the expiry extension on lookup is
/// atomic per token.
pub struct MemorySessionStore {
    lifetime: Duration,
    sessions: Mutex<HashMap<SessionToken, Session>>,
}

impl MemorySessionStore {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            sessions: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, claim: IdentityClaim) -> AppResult<SessionToken> {
        let token = SessionToken::generate();
        let now = Utc::now();
        let session = Session {
            id: token.clone(),
            claim,
            issued_at: now,
            expires_at: now + self.lifetime,
            sliding_expiration: true,
        };
        self.sessions.lock().insert(token.clone(), session);
        Ok(token)
    }

    async fn lookup(&self, token: &SessionToken) -> AppResult<Option<Session>> {
        let now = Utc::now();
        let mut sessions = self.sessions.lock();
        let Some(session) = sessions.get_mut(token) else {
            return Ok(None);
        };
        if session.is_expired(now) {
            sessions.remove(token);
            return Ok(None);
        }
        if session.sliding_expiration {
            session.expires_at = now + self.lifetime;
        }
        Ok(Some(session.clone()))
    }

    async fn destroy(&self, token: &SessionToken) -> AppResult<()> {
        self.sessions.lock().remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_claim() -> IdentityClaim {
        IdentityClaim {
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            picture: None,
        }
    }

    #[tokio::test]
    async fn test_lookup_after_create_returns_matching_claim() {
        let store = MemorySessionStore::new(Duration::days(30));

        let token = store.create(test_claim()).await.unwrap();
        let session = store.lookup(&token).await.unwrap().expect("session expected");

        assert_eq!(session.id, token);
        assert_eq!(session.claim, test_claim());
        assert!(session.sliding_expiration);
    }

    #[tokio::test]
    async fn test_lookup_unknown_token_is_absent() {
        let store = MemorySessionStore::new(Duration::days(30));

        let unknown = SessionToken::generate();
        assert!(store.lookup(&unknown).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_extends_sliding_expiration() {
        let store = MemorySessionStore::new(Duration::days(30));

        let token = store.create(test_claim()).await.unwrap();
        let first = store.lookup(&token).await.unwrap().unwrap();
        let second = store.lookup(&token).await.unwrap().unwrap();

        assert!(
            second.expires_at >= first.expires_at,
            "expiry must never move backwards on use"
        );
        assert!(second.expires_at > first.issued_at + Duration::days(29));
    }

    // A lifetime of a few tens of milliseconds stands in for the 30-day
    // window: repeated lookups inside the window keep the session alive past
    // the original deadline, and silence lets it lapse.
    #[tokio::test]
    async fn test_session_survives_through_repeated_use() {
        let store = MemorySessionStore::new(Duration::milliseconds(200));

        let token = store.create(test_claim()).await.unwrap();
        for _ in 0..3 {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            assert!(
                store.lookup(&token).await.unwrap().is_some(),
                "lookup inside the sliding window must succeed"
            );
        }
    }

    #[tokio::test]
    async fn test_expired_session_is_absent() {
        let store = MemorySessionStore::new(Duration::milliseconds(50));

        let token = store.create(test_claim()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(80)).await;

        assert!(store.lookup(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_destroy_is_idempotent() {
        let store = MemorySessionStore::new(Duration::days(30));

        let token = store.create(test_claim()).await.unwrap();
        store.destroy(&token).await.unwrap();
        store.destroy(&token).await.unwrap();
        store.destroy(&SessionToken::generate()).await.unwrap();

        assert!(store.lookup(&token).await.unwrap().is_none());
    }
}
