use chrono::{DateTime, Utc};

use crate::domain::entities::claim::IdentityClaim;
use crate::domain::entities::token::SessionToken;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionToken,
    pub claim: IdentityClaim,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub sliding_expiration: bool,
}

impl Session {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
