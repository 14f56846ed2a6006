//! Per-interaction orchestration.
//!
//! Each user action triggers one pass that reads current state, performs
//! any needed fetches, recomputes derived values, and hands the host a
//! value to render from. Activities and token failures abort the pass;
//! city and weather failures degrade (empty list, missing years).

use std::time::Duration;

use chrono::NaiveDate;

use roamly_catalog::{Activity, CatalogClient, CityCandidate};
use roamly_core::{AppError, Config};
use roamly_weather::{classify, HistoryClient, WeatherAssessment, WeatherSample};

use crate::categories::preset_categories;
use crate::error_mapping;
use crate::pipeline::{render_page, Page, SortOrder};
use crate::state::SessionState;

/// Result of one search pass.
#[derive(Debug)]
pub struct SearchOutcome {
    pub activities: Vec<Activity>,
    pub samples: Vec<WeatherSample>,
    pub assessment: WeatherAssessment,
    /// True when a pending weather preset was applied during this pass;
    /// the host must re-present the category selection.
    pub preset_applied: bool,
}

pub struct Explorer {
    catalog: CatalogClient,
    weather: HistoryClient,
}

impl Explorer {
    pub fn new(catalog: CatalogClient, weather: HistoryClient) -> Self {
        Self { catalog, weather }
    }

    /// Wire up both clients from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let catalog = CatalogClient::new(
            config.catalog.base_url.as_str(),
            config.catalog.auth_url.as_str(),
            config.catalog.client_id.as_str(),
            config.catalog.client_secret.as_str(),
        )
        .map_err(error_mapping::catalog_error)?;

        let weather = HistoryClient::new(
            config.weather.base_url.as_str(),
            Duration::from_secs(u64::from(config.weather.cache_minutes) * 60),
        )
        .map_err(error_mapping::weather_error)?;

        Ok(Self::new(catalog, weather))
    }

    /// Keystroke-driven city lookup. Lookup failures come back as an empty
    /// list; only an authentication failure propagates.
    pub async fn search_cities(&self, query: &str) -> Result<Vec<CityCandidate>, AppError> {
        self.catalog
            .search_cities(query)
            .await
            .map_err(error_mapping::catalog_error)
    }

    /// One full search pass for the selected city and date.
    ///
    /// Fetches activities (failures abort, no partial list), collects the
    /// three-year weather history (failures shrink the sample list),
    /// classifies it, applies a pending preset, and resets to page 1.
    pub async fn run_search(
        &self,
        state: &mut SessionState,
        city: &CityCandidate,
        radius_km: u8,
        date: NaiveDate,
    ) -> Result<SearchOutcome, AppError> {
        let activities = self
            .catalog
            .activities(city.latitude, city.longitude, radius_km)
            .await
            .map_err(error_mapping::catalog_error)?;

        let samples = self
            .weather
            .historical_samples(city.latitude, city.longitude, date)
            .await;
        let assessment = classify(&samples);

        let preset_applied = state.apply_preset_if_pending(preset_categories(
            assessment.rain_expected,
            assessment.avg_temp,
        ));

        state.begin_search();

        tracing::info!(
            "Search for {}: {} activities, {} weather samples",
            city.label(),
            activities.len(),
            samples.len()
        );

        Ok(SearchOutcome {
            activities,
            samples,
            assessment,
            preset_applied,
        })
    }

    /// Render the session's current page of activities, re-clamping the
    /// stored page number against the new page count.
    pub fn page(
        &self,
        state: &mut SessionState,
        activities: &[Activity],
        sort: SortOrder,
        page_size: usize,
    ) -> Page {
        let page = render_page(
            activities,
            state.active_categories(),
            sort,
            page_size,
            state.page(),
        );
        state.clamp_page(page.max_page);
        page
    }
}
