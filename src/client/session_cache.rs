use serde::Deserialize;
use tokio::sync::watch;
use tracing::debug;
use url::Url;

const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Non-authoritative view of "who is logged in", as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionUser {
    pub name: String,
    pub email: String,
    pub picture: Option<String>,
}

/// Client-side mirror of the authenticated session.
///
/// One watch channel holds the latest `Option<SessionUser>`; every new
/// subscriber immediately observes the current value, then subsequent
/// changes. Failures are data here: a 401, a network error, or a malformed
/// body all publish `None` rather than surfacing an error, because this
/// cache never grants access by itself; the cookie does, and the server
/// re-validates it on every request.
///
/// Overlapping `refresh` calls are not guarded against each other; whichever
/// response resolves last wins.
pub struct SessionCache {
    http: reqwest::Client,
    api_base: Url,
    current: watch::Sender<Option<SessionUser>>,
}

impl SessionCache {
    /// # Errors
    ///
    /// Returns the underlying error if the HTTP client cannot be built.
    pub fn new(api_base: Url) -> reqwest::Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_http_client(api_base, http))
    }

    /// Use a custom HTTP client (for a shared cookie jar or testing).
    #[must_use]
    pub fn with_http_client(mut api_base: Url, http: reqwest::Client) -> Self {
        if !api_base.path().ends_with('/') {
            let path = format!("{}/", api_base.path());
            api_base.set_path(&path);
        }
        let (current, _) = watch::channel(None);
        Self {
            http,
            api_base,
            current,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<SessionUser>> {
        self.current.subscribe()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<SessionUser> {
        self.current.borrow().clone()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Where to send the browser to start the login dance.
    #[must_use]
    pub fn login_url(&self) -> Url {
        self.api_base
            .join("api/auth/login")
            .expect("valid login URL")
    }

    /// Queries the identity endpoint and publishes the outcome.
    pub async fn refresh(&self) {
        let user = self.fetch_user().await;
        self.current.send_replace(user);
    }

    async fn fetch_user(&self) -> Option<SessionUser> {
        let url = self.api_base.join("api/auth/user").ok()?;
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!("Identity query failed, treating as logged out: {err}");
                return None;
            }
        };
        if response.status() != reqwest::StatusCode::OK {
            return None;
        }
        response.json::<SessionUser>().await.ok()
    }

    /// One-shot seeding from identity data the server pushed alongside the
    /// post-login redirect, saving the initial round trip. Takes the value
    /// by move; the caller must drop its copy of the redirect payload so it
    /// cannot linger in history or bookmarks.
    pub fn adopt_from_redirect(&self, user: SessionUser) {
        self.current.send_replace(Some(user));
    }

    /// Ends the session server-side and publishes "absent" no matter what:
    /// after asking to log out, the UI must never keep showing a user.
    pub async fn logout(&self) {
        if let Ok(url) = self.api_base.join("api/auth/logout") {
            if let Err(err) = self.http.post(url).send().await {
                debug!("Logout request failed, clearing local state anyway: {err}");
            }
        }
        self.current.send_replace(None);
    }
}
