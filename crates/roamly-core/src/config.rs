use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Activities catalogue API settings
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Historical weather archive settings
    #[serde(default)]
    pub weather: WeatherArchiveConfig,

    /// Default values for the search surface
    #[serde(default)]
    pub defaults: SearchDefaults,
}

/// Activities catalogue (Amadeus self-service) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// API client ID
    /// Create at: https://developers.amadeus.com/my-apps
    pub client_id: String,

    /// API client secret
    pub client_secret: String,

    /// Token endpoint for the client-credentials grant
    pub auth_url: String,

    /// Base URL for catalogue requests (city lookup, activities)
    pub base_url: String,
}

impl CatalogConfig {
    /// Check if credentials are configured (not placeholders)
    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty()
            && !self.client_secret.is_empty()
            && !self.client_id.starts_with("YOUR_")
            && !self.client_secret.starts_with("YOUR_")
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            client_id: std::env::var("ROAMLY_CLIENT_ID")
                .unwrap_or_else(|_| "YOUR_CLIENT_ID".to_string()),
            client_secret: std::env::var("ROAMLY_CLIENT_SECRET")
                .unwrap_or_else(|_| "YOUR_CLIENT_SECRET".to_string()),
            auth_url: "https://test.api.amadeus.com/v1/security/oauth2/token".to_string(),
            base_url: "https://test.api.amadeus.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherArchiveConfig {
    /// Base URL for the historical weather archive
    pub base_url: String,

    /// How long a fetched day of weather stays cached, in minutes
    #[serde(default = "default_weather_cache_minutes")]
    pub cache_minutes: u32,
}

fn default_weather_cache_minutes() -> u32 {
    60
}

impl Default for WeatherArchiveConfig {
    fn default() -> Self {
        Self {
            base_url: "https://archive-api.open-meteo.com".to_string(),
            cache_minutes: default_weather_cache_minutes(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchDefaults {
    /// Search radius around the selected city, in km (catalogue accepts 1-20)
    #[serde(default = "default_radius_km")]
    pub radius_km: u8,

    /// Results shown per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_radius_km() -> u8 {
    5
}

fn default_page_size() -> usize {
    10
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            radius_km: default_radius_km(),
            page_size: default_page_size(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: CatalogConfig::default(),
            weather: WeatherArchiveConfig::default(),
            defaults: SearchDefaults::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        let mut config: Config =
            toml::from_str(&contents).context("Failed to parse config file")?;

        // Environment always wins for credentials so they stay out of the file
        if let Ok(id) = std::env::var("ROAMLY_CLIENT_ID") {
            config.catalog.client_id = id;
        }
        if let Ok(secret) = std::env::var("ROAMLY_CLIENT_SECRET") {
            config.catalog.client_secret = secret;
        }

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.catalog.auth_url, "catalog.auth_url", &mut result);
        self.validate_url(&self.catalog.base_url, "catalog.base_url", &mut result);
        self.validate_url(&self.weather.base_url, "weather.base_url", &mut result);

        if !self.catalog.is_configured() {
            result.add_warning(
                "catalog",
                "Catalogue credentials not configured - city and activity search will fail",
            );
        }

        // The catalogue rejects radii outside 1-20 km
        if self.defaults.radius_km == 0 || self.defaults.radius_km > 20 {
            result.add_error(
                "defaults.radius_km",
                format!("Radius must be 1-20 km, got {}", self.defaults.radius_km),
            );
        }

        if self.defaults.page_size == 0 {
            result.add_error("defaults.page_size", "Page size must be greater than 0");
        } else if self.defaults.page_size > 100 {
            result.add_warning(
                "defaults.page_size",
                "Page size is unusually large (>100)",
            );
        }

        if self.weather.cache_minutes == 0 {
            result.add_warning(
                "weather.cache_minutes",
                "Weather caching disabled (0 minutes)",
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("roamly");

        Ok(config_dir.join("config.toml"))
    }
}
