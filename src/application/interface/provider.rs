use async_trait::async_trait;

use crate::application::app_error::AppResult;
use crate::domain::entities::claim::IdentityClaim;

/// Provider-specific half of the redirect-based login exchange.
///
/// Implementations perform the network exchange only; correlation-nonce
/// bookkeeping belongs to the [`PendingLoginStore`].
///
/// [`PendingLoginStore`]: crate::application::interface::store::PendingLoginStore
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Whether client credentials are present for this deployment.
    fn is_configured(&self) -> bool;

    /// Builds the authorization-request URL the browser is redirected to.
    fn authorization_url(&self, state: &str, redirect_uri: &str) -> AppResult<String>;

    /// Exchanges the callback authorization code for the subject's identity.
    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> AppResult<IdentityClaim>;
}
