use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::claim::IdentityClaim;
use crate::domain::entities::pending_login::PendingLogin;
use crate::domain::entities::session::Session;
use crate::domain::entities::token::SessionToken;

/// Authoritative persistence of session records keyed by session token.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Issues a fresh token and stores a session with the full lifetime.
    async fn create(&self, claim: IdentityClaim) -> AppResult<SessionToken>;

    /// Returns the session, or `None` for an unknown or expired token.
    ///
    /// A successful lookup on a sliding session extends `expires_at` by the
    /// full lifetime; the read-then-extend is atomic per token.
    async fn lookup(&self, token: &SessionToken) -> AppResult<Option<Session>>;

    /// Idempotent removal; destroying an unknown token is a no-op.
    async fn destroy(&self, token: &SessionToken) -> AppResult<()>;
}

/// Short-lived correlation state between login initiation and callback.
#[async_trait]
pub trait PendingLoginStore: Send + Sync {
    async fn insert(&self, pending: PendingLogin) -> AppResult<()>;

    /// Atomic claim-and-delete. Returns `None` for an unknown, expired, or
    /// already-claimed state; the same state can never be claimed twice.
    async fn claim(&self, state: &str) -> AppResult<Option<PendingLogin>>;
}
