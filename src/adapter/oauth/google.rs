use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::provider::IdentityProvider;
use crate::domain::entities::claim::IdentityClaim;

const AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
const SCOPES: &str = "openid email profile";

/// Every provider exchange is bounded by this timeout; a slow provider
/// surfaces as an authentication failure, not a hang.
const EXCHANGE_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct GoogleCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Google half of the redirect-based login exchange.
pub struct GoogleOAuthClient {
    credentials: Option<GoogleCredentials>,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    #[serde(default)]
    name: Option<String>,
    email: String,
    #[serde(default)]
    picture: Option<String>,
}

impl GoogleOAuthClient {
    pub fn new(credentials: Option<GoogleCredentials>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(EXCHANGE_TIMEOUT)
            .build()
            .map_err(AppError::ProviderRequest)?;
        Ok(Self { credentials, http })
    }

    /// Use a custom HTTP client (for connection pool reuse or testing).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    fn credentials(&self) -> AppResult<&GoogleCredentials> {
        self.credentials.as_ref().ok_or(AppError::ProviderNotConfigured)
    }

    async fn ensure_success(
        response: reqwest::Response,
        operation: &'static str,
    ) -> AppResult<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        // Detail stays server-side; callers reduce this to a generic
        // authentication failure before anything reaches the browser.
        Err(AppError::AuthenticationFailed(format!(
            "{operation} returned status {status}: {body}"
        )))
    }
}

#[async_trait]
impl IdentityProvider for GoogleOAuthClient {
    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    fn authorization_url(&self, state: &str, redirect_uri: &str) -> AppResult<String> {
        let credentials = self.credentials()?;
        let mut url = Url::parse(AUTH_URL).expect("valid authorization endpoint");
        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &credentials.client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("state", state)
            .append_pair("scope", SCOPES);
        Ok(url.into())
    }

    async fn exchange_code(&self, code: &str, redirect_uri: &str) -> AppResult<IdentityClaim> {
        let credentials = self.credentials()?;
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.as_str()),
        ];

        let response = self.http.post(TOKEN_URL).form(&params).send().await?;
        let response = Self::ensure_success(response, "token exchange").await?;
        let token = response.json::<TokenResponse>().await?;

        let response = self
            .http
            .get(USERINFO_URL)
            .bearer_auth(&token.access_token)
            .send()
            .await?;
        let response = Self::ensure_success(response, "userinfo request").await?;
        let info = response.json::<GoogleUserInfo>().await?;

        Ok(IdentityClaim {
            name: info.name.unwrap_or_else(|| info.email.clone()),
            email: info.email,
            picture: info.picture,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured_client() -> GoogleOAuthClient {
        GoogleOAuthClient::new(Some(GoogleCredentials {
            client_id: "test-client".to_string(),
            client_secret: "test-secret".to_string(),
        }))
        .unwrap()
    }

    #[test]
    fn test_authorization_url_contains_oauth_parameters() {
        let client = configured_client();
        let url = client
            .authorization_url("the-state", "http://127.0.0.1:8080/api/auth/callback")
            .unwrap();

        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=test-client"));
        assert!(url.contains("state=the-state"));
        assert!(url.contains("scope=openid+email+profile"));
        assert!(url.contains("redirect_uri=http%3A%2F%2F127.0.0.1%3A8080%2Fapi%2Fauth%2Fcallback"));
    }

    #[test]
    fn test_unconfigured_client_reports_itself() {
        let client = GoogleOAuthClient::new(None).unwrap();

        assert!(!client.is_configured());
        let result = client.authorization_url("state", "http://localhost/callback");
        assert!(matches!(result.unwrap_err(), AppError::ProviderNotConfigured));
    }

    #[test]
    fn test_endpoint_constants_parse() {
        for endpoint in [AUTH_URL, TOKEN_URL, USERINFO_URL] {
            Url::parse(endpoint).expect("endpoint must be a valid URL");
        }
    }
}
