//! Catalogue API client: city lookup and activity search.

use std::time::Duration;

use tracing::instrument;

use crate::auth::TokenCache;
use crate::error::CatalogError;
use crate::types::{Activity, ApiActivity, ApiCity, CityCandidate, DataEnvelope};

const CITY_TIMEOUT_SECS: u64 = 10;
const ACTIVITIES_TIMEOUT_SECS: u64 = 20;

/// Result cap for the interactive city lookup; the endpoint ranks, we don't.
const CITY_LOOKUP_MAX: u32 = 10;

pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
    tokens: TokenCache,
}

impl CatalogClient {
    pub fn new(
        base_url: impl Into<String>,
        auth_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            tokens: TokenCache::new(auth_url, client_id, client_secret)?,
        })
    }

    /// Free-text city lookup, driven per keystroke by the host surface.
    ///
    /// Results without coordinates are dropped. Failures of the lookup
    /// itself degrade to "no matches" so the interactive search stays
    /// responsive; only a token failure propagates.
    #[instrument(skip(self), level = "info")]
    pub async fn search_cities(&self, keyword: &str) -> Result<Vec<CityCandidate>, CatalogError> {
        let token = self.tokens.token().await?;
        let url = format!("{}/v1/reference-data/locations/cities", self.base_url);

        let response = match self
            .client
            .get(&url)
            .query(&[
                ("keyword", keyword.to_string()),
                ("max", CITY_LOOKUP_MAX.to_string()),
            ])
            .bearer_auth(&token)
            .timeout(Duration::from_secs(CITY_TIMEOUT_SECS))
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("City lookup request failed: {}", e);
                return Ok(Vec::new());
            }
        };

        if !response.status().is_success() {
            tracing::debug!("City lookup returned status {}", response.status());
            return Ok(Vec::new());
        }

        let body: DataEnvelope<ApiCity> = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("City lookup parse error: {}", e);
                return Ok(Vec::new());
            }
        };

        Ok(body
            .data
            .into_iter()
            .filter_map(ApiCity::into_candidate)
            .collect())
    }

    /// Fetch activities around a point. Radius is in km, capped at 20 by
    /// the catalogue.
    ///
    /// Unlike the city lookup, failures here abort the whole render pass:
    /// a 5xx is reported as a server-side outage, anything else as a
    /// request failure. No partial list is ever returned.
    #[instrument(skip(self), level = "info")]
    pub async fn activities(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: u8,
    ) -> Result<Vec<Activity>, CatalogError> {
        let token = self.tokens.token().await?;
        let url = format!("{}/v1/shopping/activities", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("radius", radius_km.to_string()),
            ])
            .bearer_auth(&token)
            .timeout(Duration::from_secs(ACTIVITIES_TIMEOUT_SECS))
            .send()
            .await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(CatalogError::Server {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: text,
            });
        }

        let body: DataEnvelope<ApiActivity> = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;

        Ok(body
            .data
            .into_iter()
            .filter_map(ApiActivity::into_activity)
            .collect())
    }
}
