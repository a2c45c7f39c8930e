use std::sync::Arc;

use async_trait::async_trait;
use axum::http::header::{LOCATION, SET_COOKIE};
use axum::http::Response;
use url::Url;

use crate::application::app_error::{AppError, AppResult};
use crate::application::interface::provider::IdentityProvider;
use crate::domain::entities::claim::IdentityClaim;

pub fn ada_claim() -> IdentityClaim {
    IdentityClaim {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        picture: None,
    }
}

/// Stand-in provider: accepts every code, or rejects every code.
pub struct StubProvider {
    claim: Option<IdentityClaim>,
}

impl StubProvider {
    pub fn returning(claim: IdentityClaim) -> Arc<Self> {
        Arc::new(Self { claim: Some(claim) })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self { claim: None })
    }
}

#[async_trait]
impl IdentityProvider for StubProvider {
    fn is_configured(&self) -> bool {
        true
    }

    fn authorization_url(&self, state: &str, redirect_uri: &str) -> AppResult<String> {
        Ok(format!(
            "https://provider.example/authorize?state={state}&redirect_uri={redirect_uri}"
        ))
    }

    async fn exchange_code(&self, _code: &str, _redirect_uri: &str) -> AppResult<IdentityClaim> {
        match &self.claim {
            Some(claim) => Ok(claim.clone()),
            None => Err(AppError::AuthenticationFailed(
                "stub provider rejected the code".to_string(),
            )),
        }
    }
}

pub struct UnconfiguredProvider;

impl UnconfiguredProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self)
    }
}

#[async_trait]
impl IdentityProvider for UnconfiguredProvider {
    fn is_configured(&self) -> bool {
        false
    }

    fn authorization_url(&self, _state: &str, _redirect_uri: &str) -> AppResult<String> {
        Err(AppError::ProviderNotConfigured)
    }

    async fn exchange_code(&self, _code: &str, _redirect_uri: &str) -> AppResult<IdentityClaim> {
        Err(AppError::ProviderNotConfigured)
    }
}

pub fn location_header<B>(response: &Response<B>) -> String {
    response
        .headers()
        .get(LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub fn set_cookie_header<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// `name=value` pair from a full Set-Cookie header.
pub fn cookie_pair(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

pub fn state_from_location(location: &str) -> String {
    Url::parse(location)
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == "state")
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_default()
}
