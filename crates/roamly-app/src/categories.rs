//! Activity categories and the weather-derived preset.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// The fixed set of categories offered by the activity filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Tours,
    Museums,
    Restaurants,
    Wine,
    Historical,
    Sightseeing,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Tours,
        Category::Museums,
        Category::Restaurants,
        Category::Wine,
        Category::Historical,
        Category::Sightseeing,
    ];

    /// Keyword substrings matched case-insensitively against an activity's
    /// name and description. Overlap between categories is fine; filtering
    /// is a pure membership test over the union of active keywords.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Tours => &["tour", "excursion", "guide"],
            Self::Museums => &["museum", "gallery", "exhibit"],
            Self::Restaurants => &["restaurant", "food", "dinner", "culinary", "tasting"],
            Self::Wine => &["wine", "winery", "vineyard"],
            Self::Historical => &["histor", "castle", "monument", "heritage", "ancient"],
            Self::Sightseeing => &["sightseeing", "landmark", "viewpoint", "cruise", "panorama"],
        }
    }

    /// Get a human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Tours => "Tours",
            Self::Museums => "Museums",
            Self::Restaurants => "Restaurants",
            Self::Wine => "Wine",
            Self::Historical => "Historical",
            Self::Sightseeing => "Sightseeing",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tours" => Ok(Self::Tours),
            "museums" => Ok(Self::Museums),
            "restaurants" => Ok(Self::Restaurants),
            "wine" => Ok(Self::Wine),
            "historical" => Ok(Self::Historical),
            "sightseeing" => Ok(Self::Sightseeing),
            other => Err(format!("Unknown category: {}", other)),
        }
    }
}

/// Category preset derived from historical weather for the chosen date.
///
/// Advisory only: applying it overwrites the current selection, and a
/// manual edit cancels a pending preset (see `SessionState`). An unknown
/// temperature is not "below 15", so it falls through to the warm branch.
pub fn preset_categories(rain_expected: bool, avg_temp: Option<f64>) -> BTreeSet<Category> {
    use Category::*;

    if rain_expected {
        BTreeSet::from([Museums, Restaurants, Historical, Sightseeing])
    } else if avg_temp.is_some_and(|t| t < 15.0) {
        BTreeSet::from([Museums, Historical, Tours, Sightseeing])
    } else {
        BTreeSet::from([Wine, Historical])
    }
}

/// Shown by the host surface's expandable help panel.
pub const PRESET_HELP: &str = "\
The weather preset looks at the same date in the last three years \
(365-day steps, so the date drifts by a day across leap years):
  - rain in at least 2 of those years: Museums, Restaurants, Historical, Sightseeing
  - otherwise, average temperature below 15 C: Museums, Historical, Tours, Sightseeing
  - otherwise: Wine, Historical
The preset replaces your current category selection when the next search \
completes; editing categories before then cancels it.";

#[cfg(test)]
mod tests {
    use super::*;
    use Category::*;

    #[test]
    fn test_rain_preset_ignores_temperature() {
        let expected = BTreeSet::from([Museums, Restaurants, Historical, Sightseeing]);
        assert_eq!(preset_categories(true, Some(30.0)), expected);
        assert_eq!(preset_categories(true, Some(-5.0)), expected);
        assert_eq!(preset_categories(true, None), expected);
    }

    #[test]
    fn test_cold_preset() {
        assert_eq!(
            preset_categories(false, Some(10.0)),
            BTreeSet::from([Museums, Historical, Tours, Sightseeing])
        );
    }

    #[test]
    fn test_warm_preset() {
        assert_eq!(
            preset_categories(false, Some(20.0)),
            BTreeSet::from([Wine, Historical])
        );
    }

    #[test]
    fn test_fifteen_degrees_is_not_cold() {
        assert_eq!(
            preset_categories(false, Some(15.0)),
            BTreeSet::from([Wine, Historical])
        );
    }

    #[test]
    fn test_unknown_temperature_falls_through_to_warm() {
        assert_eq!(
            preset_categories(false, None),
            BTreeSet::from([Wine, Historical])
        );
    }

    #[test]
    fn test_category_round_trip_from_str() {
        for category in Category::ALL {
            let parsed: Category = category
                .display_name()
                .to_lowercase()
                .parse()
                .unwrap();
            assert_eq!(parsed, category);
        }
        assert!("karaoke".parse::<Category>().is_err());
    }
}
