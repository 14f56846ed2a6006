//! Centralized error types for the Roamly application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Top-level application error type.
///
/// All errors in the Roamly application should be convertible to this type.
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Catalogue API error: {0}")]
    Catalog(#[from] CatalogApiError),

    #[error("Weather archive error: {0}")]
    Weather(#[from] WeatherApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    ///
    /// These messages are designed to be actionable and non-technical.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Auth(e) => e.user_message(),
            AppError::Catalog(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Other(_) => "An unexpected error occurred. Please try again.",
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::MissingSetting(_) => "A required setting is missing. Check your settings.",
        }
    }
}

/// Authentication errors (token endpoint, credentials).
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Token request rejected: {0}")]
    Rejected(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token endpoint unreachable: {0}")]
    Unreachable(String),
}

impl AuthError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::Rejected(_) => "Authentication failed. Check your API credentials.",
            AuthError::InvalidCredentials => "Invalid credentials. Please check and try again.",
            AuthError::Unreachable(_) => {
                "Could not reach the sign-in service. Check your connection."
            }
        }
    }
}

/// Activities catalogue errors.
#[derive(Debug, Error)]
pub enum CatalogApiError {
    #[error("Catalogue server error: {status}")]
    ServerError { status: u16 },

    #[error("Catalogue request failed: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Catalogue response malformed: {0}")]
    InvalidResponse(String),
}

impl CatalogApiError {
    pub fn user_message(&self) -> &'static str {
        match self {
            CatalogApiError::ServerError { .. } => {
                "The activities service is experiencing issues. Please try again later."
            }
            CatalogApiError::ApiError { .. } => "Activity search failed. Please try again.",
            CatalogApiError::InvalidResponse(_) => {
                "Received an unexpected response from the activities service."
            }
        }
    }
}

/// Historical weather archive errors.
#[derive(Debug, Error)]
pub enum WeatherApiError {
    #[error("No weather data available")]
    NoData,

    #[error("Archive error: {0}")]
    ApiError(String),
}

impl WeatherApiError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherApiError::NoData => "No weather data available for this date.",
            WeatherApiError::ApiError(_) => "Weather lookup failed. Please try again.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_conversion() {
        let auth_err = AuthError::InvalidCredentials;
        let app_err: AppError = auth_err.into();
        assert!(matches!(app_err, AppError::Auth(AuthError::InvalidCredentials)));
    }

    #[test]
    fn test_user_message_propagation() {
        let app_err = AppError::Auth(AuthError::InvalidCredentials);
        assert_eq!(
            app_err.user_message(),
            "Invalid credentials. Please check and try again."
        );
    }

    #[test]
    fn test_server_error_message_distinguishes_5xx() {
        let err = CatalogApiError::ServerError { status: 500 };
        assert!(err.user_message().contains("experiencing issues"));

        let err = CatalogApiError::ApiError {
            status: 400,
            message: "bad request".into(),
        };
        assert!(!err.user_message().contains("experiencing issues"));
    }
}
