use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One historical day of weather at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub date: NaiveDate,
    pub max_temp: f64,
    pub min_temp: f64,
    pub precipitation: f64,
}

impl WeatherSample {
    /// Midpoint of the day's max and min temperature.
    pub fn mean_temp(&self) -> f64 {
        (self.max_temp + self.min_temp) / 2.0
    }

    /// Whether any precipitation fell that day.
    pub fn is_wet(&self) -> bool {
        self.precipitation > 0.0
    }
}

/// Archive response shape: parallel per-day arrays under `daily`, entries
/// nullable when the station has no reading.
#[derive(Debug, Deserialize)]
pub(crate) struct ArchiveResponse {
    pub daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DailyBlock {
    #[allow(dead_code)]
    #[serde(default)]
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m_max: Vec<Option<f64>>,
    #[serde(default)]
    pub temperature_2m_min: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation_sum: Vec<Option<f64>>,
}

impl ArchiveResponse {
    /// Collapse a single-day response into a sample. Any missing reading
    /// means the whole day is treated as unavailable.
    pub(crate) fn into_sample(self, date: NaiveDate) -> Option<WeatherSample> {
        let daily = self.daily?;
        let max_temp = daily.temperature_2m_max.first().copied().flatten()?;
        let min_temp = daily.temperature_2m_min.first().copied().flatten()?;
        let precipitation = daily.precipitation_sum.first().copied().flatten()?;
        Some(WeatherSample {
            date,
            max_temp,
            min_temp,
            precipitation,
        })
    }
}
