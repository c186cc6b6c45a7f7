//! Job Locations
//!
//! Location context for an estimate. These values are informational for the
//! form layer (suggested hand-dig percentage, traffic control flag) - the
//! calculation formulas do not read them.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Job location class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    /// City / urban
    City,
    /// Highway / major road
    Highway,
    Rural,
    Remote,
}

/// Planning hints for a location class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationProperties {
    /// Display label
    pub label: &'static str,
    /// Suggested hand-dig percentage for utility congestion typical of the area
    pub hand_dig_pct_hint: f64,
    /// Whether traffic control is normally required
    pub traffic_control: bool,
}

const CITY: LocationProperties = LocationProperties {
    label: "City / Urban",
    hand_dig_pct_hint: 30.0,
    traffic_control: true,
};

const HIGHWAY: LocationProperties = LocationProperties {
    label: "Highway / Major Road",
    hand_dig_pct_hint: 15.0,
    traffic_control: true,
};

const RURAL: LocationProperties = LocationProperties {
    label: "Rural",
    hand_dig_pct_hint: 10.0,
    traffic_control: false,
};

const REMOTE: LocationProperties = LocationProperties {
    label: "Remote",
    hand_dig_pct_hint: 5.0,
    traffic_control: false,
};

impl LocationType {
    /// All location classes for UI selection
    pub const ALL: [LocationType; 4] = [
        LocationType::City,
        LocationType::Highway,
        LocationType::Rural,
        LocationType::Remote,
    ];

    /// Get the key string used in saved estimates
    pub fn code(&self) -> &'static str {
        match self {
            LocationType::City => "city",
            LocationType::Highway => "highway",
            LocationType::Rural => "rural",
            LocationType::Remote => "remote",
        }
    }

    /// Planning hints for this location class
    pub fn properties(&self) -> &'static LocationProperties {
        match self {
            LocationType::City => &CITY,
            LocationType::Highway => &HIGHWAY,
            LocationType::Rural => &RURAL,
            LocationType::Remote => &REMOTE,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_lowercase().as_str() {
            "city" | "urban" => Ok(LocationType::City),
            "highway" | "road" => Ok(LocationType::Highway),
            "rural" => Ok(LocationType::Rural),
            "remote" => Ok(LocationType::Remote),
            _ => Err(CalcError::unknown_option("location_type", s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        self.properties().label
    }
}

impl std::fmt::Display for LocationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl Default for LocationType {
    fn default() -> Self {
        LocationType::City
    }
}
