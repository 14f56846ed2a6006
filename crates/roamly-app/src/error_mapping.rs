//! Maps service-crate errors to `roamly_core::AppError` for consistent
//! user-facing messages.

use roamly_catalog::CatalogError;
use roamly_core::error::ReqwestErrorExt;
use roamly_core::{AppError, AuthError, CatalogApiError, WeatherApiError};
use roamly_weather::WeatherError;

pub fn catalog_error(e: CatalogError) -> AppError {
    match e {
        CatalogError::Auth(msg) => AppError::Auth(AuthError::Rejected(msg)),
        CatalogError::Server { status } => {
            AppError::Catalog(CatalogApiError::ServerError { status })
        }
        CatalogError::Api { status, message } => {
            AppError::Catalog(CatalogApiError::ApiError { status, message })
        }
        CatalogError::InvalidResponse(msg) => {
            AppError::Catalog(CatalogApiError::InvalidResponse(msg))
        }
        CatalogError::Network(e) => AppError::Network(e.into_network_error()),
    }
}

pub fn weather_error(e: WeatherError) -> AppError {
    match e {
        WeatherError::Api { status } => {
            AppError::Weather(WeatherApiError::ApiError(format!("status {}", status)))
        }
        WeatherError::InvalidResponse(msg) => AppError::Weather(WeatherApiError::ApiError(msg)),
        WeatherError::Network(e) => AppError::Network(e.into_network_error()),
    }
}
