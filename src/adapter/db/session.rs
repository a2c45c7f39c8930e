use async_trait::async_trait;
use chrono::{Duration, Utc};
use sqlx::{PgPool, Row};

use crate::application::app_error::AppResult;
use crate::application::interface::store::SessionStore;
use crate::domain::entities::claim::IdentityClaim;
use crate::domain::entities::session::Session;
use crate::domain::entities::token::SessionToken;

/// Postgres-backed session store (see `migrations/` for the schema).
///
/// The sliding extension happens in a single conditional UPDATE, so
/// concurrent lookups of the same token cannot lose an extension.
pub struct PgSessionStore {
    pool: PgPool,
    lifetime: Duration,
}

impl PgSessionStore {
    pub fn new(pool: PgPool, lifetime: Duration) -> Self {
        Self { pool, lifetime }
    }
}

#[async_trait]
impl SessionStore for PgSessionStore {
    async fn create(&self, claim: IdentityClaim) -> AppResult<SessionToken> {
        let token = SessionToken::generate();
        let now = Utc::now();
        sqlx::query(
            r#"
                INSERT INTO sessions
                    (id, name, email, picture, issued_at, expires_at, sliding_expiration)
                VALUES ($1, $2, $3, $4, $5, $6, TRUE)
            "#,
        )
        .bind(token.as_str())
        .bind(&claim.name)
        .bind(&claim.email)
        .bind(&claim.picture)
        .bind(now)
        .bind(now + self.lifetime)
        .execute(&self.pool)
        .await?;
        Ok(token)
    }

    async fn lookup(&self, token: &SessionToken) -> AppResult<Option<Session>> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
                UPDATE sessions
                SET expires_at = CASE WHEN sliding_expiration THEN $2 ELSE expires_at END
                WHERE id = $1 AND expires_at > $3
                RETURNING name, email, picture, issued_at, expires_at, sliding_expiration
            "#,
        )
        .bind(token.as_str())
        .bind(now + self.lifetime)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;
        match result {
            Some(row) => Ok(Some(Session {
                id: token.clone(),
                claim: IdentityClaim {
                    name: row.try_get("name")?,
                    email: row.try_get("email")?,
                    picture: row.try_get("picture")?,
                },
                issued_at: row.try_get("issued_at")?,
                expires_at: row.try_get("expires_at")?,
                sliding_expiration: row.try_get("sliding_expiration")?,
            })),
            None => Ok(None),
        }
    }

    async fn destroy(&self, token: &SessionToken) -> AppResult<()> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(token.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
