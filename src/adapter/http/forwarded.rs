use axum::http::HeaderMap;

use crate::infra::config::AppConfig;

/// External base URL of this backend as the browser sees it.
///
/// `X-Forwarded-*` headers are attacker-controlled unless a reverse proxy in
/// front of us strips and rewrites them, so they are only honored when the
/// deployment opts in.
pub fn external_base(headers: &HeaderMap, config: &AppConfig) -> String {
    if config.application.trust_forwarded_headers {
        let proto = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok());
        let host = headers.get("x-forwarded-host").and_then(|v| v.to_str().ok());
        if let (Some(proto), Some(host)) = (proto, host) {
            return format!("{proto}://{host}");
        }
    }
    config.application.public_url.trim_end_matches('/').to_string()
}

/// Absolute callback URL registered with the identity provider.
pub fn callback_url(headers: &HeaderMap, config: &AppConfig) -> String {
    format!("{}/api/auth/callback", external_base(headers, config))
}
