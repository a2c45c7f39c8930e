use chrono::{DateTime, Duration, Utc};

/// Correlation state bridging login initiation and the provider callback.
///
/// Single-use: the store removes it on claim, success or failure alike.
#[derive(Debug, Clone)]
pub struct PendingLogin {
    pub state: String,
    pub return_to: String,
    pub issued_at: DateTime<Utc>,
}

impl PendingLogin {
    #[must_use]
    pub fn new(state: String, return_to: String) -> Self {
        Self {
            state,
            return_to,
            issued_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.issued_at > ttl
    }
}
