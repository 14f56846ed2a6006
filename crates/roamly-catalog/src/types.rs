use serde::Deserialize;

/// A city returned by the lookup endpoint.
///
/// Only records carrying coordinates become candidates; everything that
/// follows a selection (activities, weather) is anchored on these.
#[derive(Debug, Clone, PartialEq)]
pub struct CityCandidate {
    pub name: String,
    pub iata_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityCandidate {
    /// Human-readable label, e.g. "Paris (PAR)" or just "Paris".
    pub fn label(&self) -> String {
        match &self.iata_code {
            Some(code) if !code.is_empty() => format!("{} ({})", self.name, code),
            _ => self.name.clone(),
        }
    }
}

/// Price of an activity as served by the catalogue.
///
/// The amount stays textual; the catalogue serves it as a string and not
/// every record carries a parseable number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Price {
    pub amount: Option<String>,
    #[serde(rename = "currencyCode")]
    pub currency: Option<String>,
}

/// An activity from the catalogue. Read-only within Roamly.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub name: String,
    pub rating: Option<f64>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub duration: Option<String>,
    pub pictures: Vec<String>,
    pub booking_link: Option<String>,
}

impl Activity {
    /// Price amount parsed as a number, if present and numeric.
    pub fn price_amount(&self) -> Option<f64> {
        self.price.as_ref()?.amount.as_deref()?.trim().parse().ok()
    }
}

/// Generic `{ "data": [...] }` envelope the catalogue wraps results in.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiGeoCode {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiCity {
    pub name: Option<String>,
    #[serde(rename = "iataCode")]
    pub iata_code: Option<String>,
    #[serde(rename = "geoCode")]
    pub geo_code: Option<ApiGeoCode>,
}

impl ApiCity {
    /// Convert to a candidate, dropping records without coordinates.
    pub(crate) fn into_candidate(self) -> Option<CityCandidate> {
        let geo = self.geo_code?;
        Some(CityCandidate {
            name: self.name?,
            iata_code: self.iata_code,
            latitude: geo.latitude?,
            longitude: geo.longitude?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiActivity {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "shortDescription")]
    pub short_description: Option<String>,
    /// Served as a string, e.g. "4.3"
    pub rating: Option<String>,
    pub price: Option<Price>,
    #[serde(rename = "minimumDuration")]
    pub minimum_duration: Option<String>,
    #[serde(default)]
    pub pictures: Vec<String>,
    #[serde(rename = "bookingLink")]
    pub booking_link: Option<String>,
}

impl ApiActivity {
    /// Convert to the domain type. Unnamed records are dropped; ratings
    /// that fail to parse become absent rather than an error.
    pub(crate) fn into_activity(self) -> Option<Activity> {
        Some(Activity {
            name: self.name?,
            rating: self.rating.and_then(|r| r.trim().parse().ok()),
            description: self.description.or(self.short_description),
            price: self.price,
            duration: self.minimum_duration,
            pictures: self.pictures,
            booking_link: self.booking_link,
        })
    }
}
