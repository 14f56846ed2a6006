//! Catalogue-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Catalogue server error: {status}")]
    Server { status: u16 },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl CatalogError {
    /// User-friendly error message for UI display.
    pub fn user_message(&self) -> String {
        match self {
            Self::Auth(_) => "Authentication failed. Check your API credentials.".to_string(),
            Self::Server { status } => {
                format!("The activities service is having trouble ({}). Try again later.", status)
            }
            Self::Api { status, .. } => format!("Activity search failed ({}).", status),
            Self::InvalidResponse(_) => {
                "Received an unexpected response from the activities service.".to_string()
            }
            Self::Network(_) => "Network error. Check your connection.".to_string(),
        }
    }

    /// Whether the failure came from the catalogue's side (5xx).
    pub fn is_server_side(&self) -> bool {
        matches!(self, Self::Server { .. })
    }
}
