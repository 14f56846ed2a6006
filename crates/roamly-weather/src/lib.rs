//! Historical weather for Roamly.
//!
//! Fetches same-date weather for the last three years from an archive API
//! and classifies it into a rain flag and an average temperature.

pub mod cache;
pub mod classify;
pub mod client;
pub mod error;
pub mod types;

pub use cache::TtlCache;
pub use classify::{classify, WeatherAssessment};
pub use client::HistoryClient;
pub use error::WeatherError;
pub use types::WeatherSample;
