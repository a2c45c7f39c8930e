use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::{HeaderMap, COOKIE, SET_COOKIE},
    middleware::Next,
    response::Response,
};

use crate::adapter::http::middleware::extractor::AuthUser;
use crate::application::app_error::{AppError, AppResult};
use crate::application::dto::auth::SessionTokenDTO;
use crate::application::interactors::session::ValidateSessionInteractor;
use crate::infra::config::{AppConfig, SessionConfig};

/// Marker for a request whose successful lookup extended the session; the
/// cookie middleware re-issues the cookie so the browser lifetime slides too.
#[derive(Clone)]
pub struct SessionRefresh {
    pub session_id: String,
}

pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    interactor: ValidateSessionInteractor,
    mut request: Request,
    next: Next,
) -> AppResult<Response> {
    let token = session_token_from_headers(request.headers(), &config.session.cookie_name)
        .ok_or(AppError::InvalidCredentials)?;
    let session = interactor
        .execute(SessionTokenDTO { token })
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    request.extensions_mut().insert(AuthUser {
        name: session.claim.name,
        email: session.claim.email,
        picture: session.claim.picture,
    });
    if session.sliding_expiration {
        request.extensions_mut().insert(SessionRefresh {
            session_id: session.id.to_string(),
        });
    }

    Ok(next.run(request).await)
}

pub fn session_token_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let cookie_header = headers.get(COOKIE).and_then(|v| v.to_str().ok())?;

    for cookie in cookie_header.split(";") {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(&format!("{}=", cookie_name)) {
            return Some(value.to_string());
        }
    }

    None
}

pub async fn session_cookie_middleware(
    State(config): State<Arc<AppConfig>>,
    request: Request,
    next: Next,
) -> Response {
    let refreshed = request.extensions().get::<SessionRefresh>().cloned();
    let mut response = next.run(request).await;
    if let Some(refreshed) = refreshed {
        let cookie = build_session_cookie(&refreshed.session_id, &config.session);

        if let Ok(value) = cookie.parse() {
            response.headers_mut().insert(SET_COOKIE, value);
        }
    }
    response
}

pub fn build_session_cookie(session_id: &str, config: &SessionConfig) -> String {
    let secure = if config.cookie_secure { "; Secure" } else { "" };
    let http_only = if config.cookie_http_only {
        "; HttpOnly"
    } else {
        ""
    };
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax{}{}",
        config.cookie_name, session_id, config.max_lifetime, secure, http_only
    )
}

pub fn build_logout_cookie(config: &SessionConfig) -> String {
    format!("{}=; Path=/; Max-Age=0; SameSite=Lax", config.cookie_name)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;
    use crate::tests::fixtures::test_config;

    fn headers_with_cookie(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_session_token_from_headers_finds_named_cookie() {
        let headers = headers_with_cookie("theme=dark; session_id=abc123; lang=en");
        assert_eq!(
            session_token_from_headers(&headers, "session_id"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_session_token_from_headers_missing_cookie() {
        let headers = headers_with_cookie("theme=dark");
        assert_eq!(session_token_from_headers(&headers, "session_id"), None);
        assert_eq!(session_token_from_headers(&HeaderMap::new(), "session_id"), None);
    }

    #[test]
    fn test_session_cookie_hardened_attributes() {
        let mut config = test_config().session;
        config.cookie_secure = true;

        let cookie = build_session_cookie("abc123", &config);
        assert!(cookie.starts_with("session_id=abc123; "));
        assert!(cookie.contains("SameSite=Lax"));
        assert!(cookie.contains("; Secure"));
        assert!(cookie.contains("; HttpOnly"));
        assert!(cookie.contains(&format!("Max-Age={}", config.max_lifetime)));
    }

    #[test]
    fn test_session_cookie_local_development_is_not_secure() {
        let config = test_config().session;

        let cookie = build_session_cookie("abc123", &config);
        assert!(!cookie.contains("Secure"));
        assert!(cookie.contains("; HttpOnly"));
    }

    #[test]
    fn test_logout_cookie_expires_immediately() {
        let cookie = build_logout_cookie(&test_config().session);
        assert_eq!(cookie, "session_id=; Path=/; Max-Age=0; SameSite=Lax");
    }
}
