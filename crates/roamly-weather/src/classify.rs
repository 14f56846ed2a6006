//! Turns historical samples into a rain flag and an average temperature.

use crate::types::WeatherSample;

/// Rain is expected when at least this many of the available years were wet.
const RAIN_YEAR_THRESHOLD: usize = 2;

/// Aggregate assessment of the historical samples for a date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherAssessment {
    /// True iff at least two of the available years saw precipitation.
    pub rain_expected: bool,
    /// Mean over samples of each day's (max+min)/2. `None` when no samples
    /// are available; callers must treat that as "unknown", not a number.
    pub avg_temp: Option<f64>,
}

pub fn classify(samples: &[WeatherSample]) -> WeatherAssessment {
    let wet_years = samples.iter().filter(|s| s.is_wet()).count();

    let avg_temp = if samples.is_empty() {
        None
    } else {
        let total: f64 = samples.iter().map(WeatherSample::mean_temp).sum();
        Some(total / samples.len() as f64)
    };

    WeatherAssessment {
        rain_expected: wet_years >= RAIN_YEAR_THRESHOLD,
        avg_temp,
    }
}
