//! Weather-archive error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Archive error: {status}")]
    Api { status: u16 },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl WeatherError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { status } => format!("Weather archive error ({}).", status),
            Self::InvalidResponse(_) => {
                "Received an unexpected response from the weather archive.".to_string()
            }
            Self::Network(_) => "Network error. Check your connection.".to_string(),
        }
    }
}
