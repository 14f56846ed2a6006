//! Historical weather archive client.
//!
//! One request per historical day; results are memoized per
//! (latitude, longitude, date) so adjusting other search inputs does not
//! refetch. A day that cannot be fetched is omitted, never an error.

use std::time::Duration;

use chrono::{Days, NaiveDate};
use tracing::instrument;

use crate::cache::TtlCache;
use crate::error::WeatherError;
use crate::types::{ArchiveResponse, WeatherSample};

const ARCHIVE_TIMEOUT_SECS: u64 = 10;

/// How many same-date anniversaries to look back.
const HISTORY_YEARS: u64 = 3;

/// An "anniversary" is a flat 365-day step back, not a calendar year, so
/// leap years shift the date by one day.
const DAYS_PER_YEAR: u64 = 365;

const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct DayKey {
    lat_bits: u64,
    lon_bits: u64,
    date: NaiveDate,
}

impl DayKey {
    fn new(latitude: f64, longitude: f64, date: NaiveDate) -> Self {
        Self {
            lat_bits: latitude.to_bits(),
            lon_bits: longitude.to_bits(),
            date,
        }
    }
}

pub struct HistoryClient {
    client: reqwest::Client,
    base_url: String,
    cache: TtlCache<DayKey, Option<WeatherSample>>,
}

impl HistoryClient {
    pub fn new(base_url: impl Into<String>, cache_ttl: Duration) -> Result<Self, WeatherError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(ARCHIVE_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            cache: TtlCache::new(cache_ttl),
        })
    }

    /// Fetch one day of history. `Ok(None)` means the archive has no data
    /// for that day; both outcomes are memoized.
    #[instrument(skip(self), level = "debug")]
    pub async fn day(
        &self,
        latitude: f64,
        longitude: f64,
        date: NaiveDate,
    ) -> Result<Option<WeatherSample>, WeatherError> {
        let key = DayKey::new(latitude, longitude, date);
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }

        let url = format!("{}/v1/archive", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("start_date", date.to_string()),
                ("end_date", date.to_string()),
                ("daily", DAILY_FIELDS.to_string()),
                ("timezone", "UTC".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Api {
                status: status.as_u16(),
            });
        }

        let body: ArchiveResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::InvalidResponse(e.to_string()))?;

        let sample = body.into_sample(date);
        self.cache.insert(key, sample.clone());
        Ok(sample)
    }

    /// Same-date history for the last three years: 365, 730 and 1095 days
    /// before `reference`. Years with no data and failed fetches are
    /// silently omitted; the result can hold 0 to 3 samples.
    #[instrument(skip(self), level = "info")]
    pub async fn historical_samples(
        &self,
        latitude: f64,
        longitude: f64,
        reference: NaiveDate,
    ) -> Vec<WeatherSample> {
        let mut samples = Vec::with_capacity(HISTORY_YEARS as usize);

        for offset in 1..=HISTORY_YEARS {
            let Some(date) = reference.checked_sub_days(Days::new(DAYS_PER_YEAR * offset)) else {
                continue;
            };

            match self.day(latitude, longitude, date).await {
                Ok(Some(sample)) => samples.push(sample),
                Ok(None) => tracing::debug!("No archive data for {}", date),
                Err(e) => tracing::debug!("Archive fetch failed for {}: {}", date, e),
            }
        }

        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn day_body(time: &str, max: f64, min: f64, precip: f64) -> serde_json::Value {
        serde_json::json!({
            "daily": {
                "time": [time],
                "temperature_2m_max": [max],
                "temperature_2m_min": [min],
                "precipitation_sum": [precip]
            }
        })
    }

    fn client_for(server: &MockServer) -> HistoryClient {
        HistoryClient::new(server.uri(), Duration::from_secs(3600)).unwrap()
    }

    #[tokio::test]
    async fn test_day_is_memoized() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/archive"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(day_body("2023-06-16", 24.0, 14.0, 0.0)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let date = NaiveDate::from_ymd_opt(2023, 6, 16).unwrap();

        let first = client.day(48.85, 2.35, date).await.unwrap();
        let second = client.day(48.85, 2.35, date).await.unwrap();

        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[tokio::test]
    async fn test_day_without_data_is_none_and_memoized() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/archive"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();

        assert!(client.day(0.0, 0.0, date).await.unwrap().is_none());
        assert!(client.day(0.0, 0.0, date).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_day_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/archive"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let err = client.day(0.0, 0.0, date).await.unwrap_err();

        assert!(matches!(err, WeatherError::Api { status: 500 }));
    }

    #[tokio::test]
    async fn test_historical_samples_365_day_steps() {
        let server = MockServer::start().await;

        // Reference 2024-06-15 sits past a leap day, so the first
        // anniversary lands on 2023-06-16 rather than the same calendar date.
        for (date, max) in [
            ("2023-06-16", 25.0),
            ("2022-06-16", 23.0),
            ("2021-06-16", 21.0),
        ] {
            Mock::given(method("GET"))
                .and(path("/v1/archive"))
                .and(query_param("start_date", date))
                .and(query_param("end_date", date))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(day_body(date, max, 10.0, 0.0)),
                )
                .expect(1)
                .mount(&server)
                .await;
        }

        let client = client_for(&server);
        let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let samples = client.historical_samples(48.85, 2.35, reference).await;

        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0].max_temp, 25.0);
        assert_eq!(samples[2].date, NaiveDate::from_ymd_opt(2021, 6, 16).unwrap());
    }

    #[tokio::test]
    async fn test_historical_samples_omit_failed_years() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/archive"))
            .and(query_param("start_date", "2023-06-16"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(day_body("2023-06-16", 25.0, 15.0, 2.0)),
            )
            .mount(&server)
            .await;

        // Second year: archive has nothing for that day
        Mock::given(method("GET"))
            .and(path("/v1/archive"))
            .and(query_param("start_date", "2022-06-16"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        // Third year: server error
        Mock::given(method("GET"))
            .and(path("/v1/archive"))
            .and(query_param("start_date", "2021-06-16"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let samples = client.historical_samples(48.85, 2.35, reference).await;

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].precipitation, 2.0);
    }
}
