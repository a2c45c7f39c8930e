use serde::{Deserialize, Serialize};
use url::Url;

use crate::adapter::oauth::google::GoogleCredentials;
use crate::application::app_error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub log_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    pub address: String,
    /// Base URL of this backend as the browser reaches it.
    pub public_url: String,
    /// Base URL of the SPA; the only origin allowed to make credentialed
    /// cross-origin calls.
    pub frontend_url: String,
    /// `development` or `production`; narrows the CORS method list.
    pub environment: String,
    /// Honor `X-Forwarded-Proto`/`X-Forwarded-Host` from a reverse proxy.
    pub trust_forwarded_headers: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub cookie_secure: bool,
    pub cookie_http_only: bool,
    /// Seconds; also the sliding window extended on each authenticated
    /// request.
    pub max_lifetime: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStoreConfig {
    pub backend: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginConfig {
    /// Seconds a login may stay mid-redirect before its state nonce dies.
    pub pending_ttl: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    /// When true, missing credentials abort startup instead of degrading
    /// login to a 400.
    pub required: bool,
}

impl GoogleConfig {
    pub fn credentials(&self) -> Option<GoogleCredentials> {
        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return None;
        }
        Some(GoogleCredentials {
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub application: ApplicationConfig,
    pub session: SessionConfig,
    pub session_store: SessionStoreConfig,
    pub login: LoginConfig,
    pub google: GoogleConfig,
    pub logger: LoggerConfig,
    pub db: Option<DatabaseConfig>,
}

impl AppConfig {
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<AppConfig> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: AppConfig = toml::from_str(&contents)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = std::env::var("GOOGLE_CLIENT_ID") {
            if !value.is_empty() {
                self.google.client_id = value;
            }
        }
        if let Ok(value) = std::env::var("GOOGLE_CLIENT_SECRET") {
            if !value.is_empty() {
                self.google.client_secret = value;
            }
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        validate_base_url(&self.application.frontend_url, "application.frontend_url")?;
        validate_base_url(&self.application.public_url, "application.public_url")?;
        match self.application.environment.as_str() {
            "development" | "production" => {}
            other => {
                return Err(AppError::InvalidConfig(format!(
                    "application.environment must be `development` or `production`, got `{other}`"
                )));
            }
        }
        match self.session_store.backend.as_str() {
            "memory" => {}
            "postgres" => {
                if self.db.is_none() {
                    return Err(AppError::InvalidConfig(
                        "a [db] section is required for the postgres session store".to_string(),
                    ));
                }
            }
            other => {
                return Err(AppError::InvalidConfig(format!(
                    "unknown session store backend: {other}"
                )));
            }
        }
        if self.google.required && self.google.credentials().is_none() {
            return Err(AppError::InvalidConfig(
                "google client credentials are mandated by this deployment but absent".to_string(),
            ));
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.application.environment == "production"
    }

    /// Joins a path onto the frontend base URL.
    pub fn frontend_route(&self, path: &str) -> String {
        format!(
            "{}{}",
            self.application.frontend_url.trim_end_matches('/'),
            path
        )
    }
}

fn validate_base_url(value: &str, field: &str) -> AppResult<()> {
    let url = Url::parse(value)
        .map_err(|e| AppError::InvalidConfig(format!("{field} must be an absolute URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::InvalidConfig(format!(
            "{field} must use http or https, got `{}`",
            url.scheme()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::application::app_error::AppError;
    use crate::tests::fixtures::test_config;

    #[test]
    fn test_valid_config_passes_validation() {
        test_config().validate().unwrap();
    }

    #[test]
    fn test_relative_frontend_url_is_rejected() {
        let mut config = test_config();
        config.application.frontend_url = "/dashboard".to_string();

        let result = config.validate();
        assert!(matches!(result.unwrap_err(), AppError::InvalidConfig(_)));
    }

    #[test]
    fn test_non_http_frontend_url_is_rejected() {
        let mut config = test_config();
        config.application.frontend_url = "ftp://example.com".to_string();

        let result = config.validate();
        assert!(matches!(result.unwrap_err(), AppError::InvalidConfig(_)));
    }

    #[test]
    fn test_mandated_provider_without_credentials_is_fatal() {
        let mut config = test_config();
        config.google.required = true;
        config.google.client_id.clear();

        let result = config.validate();
        assert!(matches!(result.unwrap_err(), AppError::InvalidConfig(_)));
    }

    #[test]
    fn test_postgres_backend_requires_db_section() {
        let mut config = test_config();
        config.session_store.backend = "postgres".to_string();
        config.db = None;

        let result = config.validate();
        assert!(matches!(result.unwrap_err(), AppError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let mut config = test_config();
        config.session_store.backend = "redis".to_string();

        let result = config.validate();
        assert!(matches!(result.unwrap_err(), AppError::InvalidConfig(_)));
    }

    #[test]
    fn test_frontend_route_joins_without_double_slash() {
        let mut config = test_config();
        config.application.frontend_url = "http://localhost:4200/".to_string();

        assert_eq!(
            config.frontend_route("/dashboard"),
            "http://localhost:4200/dashboard"
        );
    }

    #[test]
    fn test_empty_credentials_are_not_configured() {
        let mut config = test_config();
        config.google.client_secret.clear();

        assert!(config.google.credentials().is_none());
    }
}
