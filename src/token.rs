//! OAuth2 client-credentials token cache.
//!
//! One process-wide token slot. A token is handed out as long as it has more
//! than [`EXPIRY_MARGIN_SECS`] of life left; otherwise a fresh exchange is
//! performed against the authorization endpoint. The mutex is held across the
//! exchange, so concurrent requests arriving at the expiry boundary wait for
//! a single refresh instead of each firing their own.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::errors::AppError;
use crate::models::TokenResponse;

/// Safety margin applied when deciding whether a cached token is still
/// usable. Applied at read time; `expires_at` stores the upstream-reported
/// lifetime verbatim.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// Lifetime assumed when the token endpoint omits `expires_in`.
const DEFAULT_LIFETIME_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct CachedToken {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at - Duration::seconds(EXPIRY_MARGIN_SECS)
    }
}

pub struct TokenManager {
    token_url: String,
    client_id: String,
    client_secret: String,
    slot: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    pub fn new(cfg: &Config) -> Self {
        Self {
            token_url: cfg.token_url.clone(),
            client_id: cfg.client_id.clone(),
            client_secret: cfg.client_secret.clone(),
            slot: Mutex::new(None),
        }
    }

    /// Returns a token valid for at least [`EXPIRY_MARGIN_SECS`] more
    /// seconds, refreshing via the client-credentials grant if needed.
    ///
    /// A failed exchange leaves any previously cached token in place; the
    /// caller gets [`AppError::Auth`] and the stale token stays around for
    /// the next attempt (it may still be within its real lifetime).
    pub async fn get_valid_token(&self, http: &reqwest::Client) -> Result<String, AppError> {
        let mut slot = self.slot.lock().await;

        if let Some(cached) = slot.as_ref() {
            if cached.is_fresh(Utc::now()) {
                return Ok(cached.access_token.clone());
            }
        }

        let token = self.exchange(http).await?;
        let access = token.access_token.clone();
        *slot = Some(token);
        Ok(access)
    }

    async fn exchange(&self, http: &reqwest::Client) -> Result<CachedToken, AppError> {
        let resp = http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", "content")])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("token endpoint unreachable: {}", e);
                AppError::Auth
            })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%status, "token exchange rejected");
            return Err(AppError::Auth);
        }

        let body: TokenResponse = resp.json().await.map_err(|e| {
            tracing::warn!("malformed token response: {}", e);
            AppError::Auth
        })?;

        let lifetime = body.expires_in.unwrap_or(DEFAULT_LIFETIME_SECS);
        tracing::debug!(lifetime_secs = lifetime, "installed new access token");

        Ok(CachedToken {
            access_token: body.access_token,
            expires_at: Utc::now() + Duration::seconds(lifetime as i64),
        })
    }

    /// Snapshot of the current cache slot. Used by tests to observe refresh
    /// behavior without reaching into the mutex.
    pub async fn cached(&self) -> Option<CachedToken> {
        self.slot.lock().await.clone()
    }

    /// Seed the cache slot directly, bypassing the exchange.
    pub async fn install(&self, access_token: impl Into<String>, expires_at: DateTime<Utc>) {
        let mut slot = self.slot.lock().await;
        *slot = Some(CachedToken {
            access_token: access_token.into(),
            expires_at,
        });
    }
}
