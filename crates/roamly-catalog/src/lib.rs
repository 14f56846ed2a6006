//! Activities catalogue integration for Roamly.
//!
//! Provides the OAuth2 client-credentials token cache, city lookup, and
//! activity search against an Amadeus-style catalogue API.

pub mod auth;
pub mod client;
pub mod error;
pub mod types;

pub use auth::TokenCache;
pub use client::CatalogClient;
pub use error::CatalogError;
pub use types::{Activity, CityCandidate, Price};
