//! OAuth2 client-credentials token cache.
//!
//! The catalogue issues short-lived bearer tokens (~30 minutes). The cache
//! holds one token and refetches transparently once it expires; there is no
//! retry, a failed fetch surfaces to the caller.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Deserialize;
use std::time::Duration;

use crate::error::CatalogError;

const AUTH_TIMEOUT_SECS: u64 = 10;

/// Refresh this long before the server-reported expiry so a token never
/// lapses mid-interaction.
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

/// Caches a client-credentials bearer token until expiry.
pub struct TokenCache {
    client: reqwest::Client,
    auth_url: String,
    client_id: String,
    client_secret: String,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new(
        auth_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(AUTH_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            auth_url: auth_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            cached: Mutex::new(None),
        })
    }

    /// Return a valid bearer token, fetching a fresh one if the cached
    /// token is missing or expired.
    pub async fn token(&self) -> Result<String, CatalogError> {
        {
            let guard = self.cached.lock();
            if let Some(token) = guard.as_ref() {
                if !token.is_expired() {
                    return Ok(token.access_token.clone());
                }
            }
        }

        tracing::debug!("Fetching catalogue access token");
        let fresh = self.fetch().await?;
        let access_token = fresh.access_token.clone();
        *self.cached.lock() = Some(fresh);
        Ok(access_token)
    }

    async fn fetch(&self) -> Result<CachedToken, CatalogError> {
        let response = self
            .client
            .post(&self.auth_url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| CatalogError::Auth(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CatalogError::Auth(format!("{}: {}", status, text)));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| CatalogError::Auth(format!("token parse error: {}", e)))?;

        let lifetime = (body.expires_in - REFRESH_MARGIN_SECS).max(0);
        Ok(CachedToken {
            access_token: body.access_token,
            expires_at: Utc::now() + chrono::Duration::seconds(lifetime),
        })
    }
}
