//! Soil Classifications (OSHA soil types plus rock)
//!
//! Reference values for swell, unit weight, and allowable slope per
//! soil classification. Slope ratios are the horizontal:vertical strings
//! used on field drawings; parsing to a numeric ratio lives in
//! [`crate::calculations::geometry::parse_slope_ratio`].

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Soil classification per OSHA 1926 Subpart P, plus rock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoilType {
    /// Type A (clay, silty clay)
    #[serde(rename = "type_a")]
    TypeA,
    /// Type B (silt, sandy loam, medium clay)
    #[serde(rename = "type_b")]
    TypeB,
    /// Type C (sand, gravel, loose fill)
    #[serde(rename = "type_c")]
    TypeC,
    /// Rock / hard material
    #[serde(rename = "rock")]
    Rock,
}

/// Reference values for a soil classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SoilProperties {
    /// Display label
    pub label: &'static str,
    /// Volume increase from bank to loose state (%)
    pub swell_pct: f64,
    /// Bank (in-place) unit weight (lb/CY)
    pub weight_bank_lb_cy: f64,
    /// Loose (excavated) unit weight (lb/CY)
    pub weight_loose_lb_cy: f64,
    /// Allowable slope as an "H:V" ratio string ("vertical" for rock)
    pub slope_ratio: &'static str,
    /// Allowable slope angle from horizontal (degrees)
    pub slope_deg: f64,
}

const TYPE_A: SoilProperties = SoilProperties {
    label: "Type A (Clay, Silty Clay)",
    swell_pct: 25.0,
    weight_bank_lb_cy: 3100.0,
    weight_loose_lb_cy: 2500.0,
    slope_ratio: "0.75:1",
    slope_deg: 53.0,
};

const TYPE_B: SoilProperties = SoilProperties {
    label: "Type B (Silt, Sandy Loam, Medium Clay)",
    swell_pct: 25.0,
    weight_bank_lb_cy: 3200.0,
    weight_loose_lb_cy: 2550.0,
    slope_ratio: "1:1",
    slope_deg: 45.0,
};

const TYPE_C: SoilProperties = SoilProperties {
    label: "Type C (Sand, Gravel, Loose Fill)",
    swell_pct: 30.0,
    weight_bank_lb_cy: 2900.0,
    weight_loose_lb_cy: 2400.0,
    slope_ratio: "1.5:1",
    slope_deg: 34.0,
};

const ROCK: SoilProperties = SoilProperties {
    label: "Rock / Hard Material",
    swell_pct: 50.0,
    weight_bank_lb_cy: 4000.0,
    weight_loose_lb_cy: 2700.0,
    slope_ratio: "vertical",
    slope_deg: 90.0,
};

impl SoilType {
    /// All soil type variants for UI selection
    pub const ALL: [SoilType; 4] = [
        SoilType::TypeA,
        SoilType::TypeB,
        SoilType::TypeC,
        SoilType::Rock,
    ];

    /// Get the key string used in saved estimates (e.g., "type_b")
    pub fn code(&self) -> &'static str {
        match self {
            SoilType::TypeA => "type_a",
            SoilType::TypeB => "type_b",
            SoilType::TypeC => "type_c",
            SoilType::Rock => "rock",
        }
    }

    /// Reference values for this classification
    pub fn properties(&self) -> &'static SoilProperties {
        match self {
            SoilType::TypeA => &TYPE_A,
            SoilType::TypeB => &TYPE_B,
            SoilType::TypeC => &TYPE_C,
            SoilType::Rock => &ROCK,
        }
    }

    /// Multiplier converting bank volume to loose volume
    pub fn swell_factor(&self) -> f64 {
        1.0 + self.properties().swell_pct / 100.0
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_lowercase().replace([' ', '-'], "_").as_str() {
            "type_a" | "a" | "clay" => Ok(SoilType::TypeA),
            "type_b" | "b" | "silt" => Ok(SoilType::TypeB),
            "type_c" | "c" | "sand" => Ok(SoilType::TypeC),
            "rock" | "hard" => Ok(SoilType::Rock),
            _ => Err(CalcError::unknown_option("soil_type", s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        self.properties().label
    }
}

impl std::fmt::Display for SoilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl Default for SoilType {
    fn default() -> Self {
        SoilType::TypeB
    }
}
