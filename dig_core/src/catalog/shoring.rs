//! Shoring Systems
//!
//! Wall support method for the excavation. The choice drives both the
//! cross-section shape (sloped/benched widen the cut) and install time
//! (panels for shored boxes/shields).

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Wall support method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShoringType {
    /// No shoring (shallow cuts only)
    None,
    /// Trench box / hydraulic shields
    Shored,
    /// Walls laid back at the soil's allowable slope
    Sloped,
    /// Stepped benches cut into the walls
    Benched,
}

/// Install data for a shoring method
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShoringSpec {
    /// Display label
    pub label: &'static str,
    /// Time to set one panel/shield section (min); 0 for non-panel methods
    pub install_time_per_panel_min: f64,
    /// Standard panel height (ft); 0 for non-panel methods
    pub panel_height_ft: f64,
}

const NONE: ShoringSpec = ShoringSpec {
    label: "No Shoring",
    install_time_per_panel_min: 0.0,
    panel_height_ft: 0.0,
};

const SHORED: ShoringSpec = ShoringSpec {
    label: "Shored (Trench Box/Shields)",
    install_time_per_panel_min: 20.0,
    panel_height_ft: 8.0,
};

const SLOPED: ShoringSpec = ShoringSpec {
    label: "Sloped",
    install_time_per_panel_min: 0.0,
    panel_height_ft: 0.0,
};

const BENCHED: ShoringSpec = ShoringSpec {
    label: "Benched",
    install_time_per_panel_min: 0.0,
    panel_height_ft: 0.0,
};

impl ShoringType {
    /// All shoring methods for UI selection
    pub const ALL: [ShoringType; 4] = [
        ShoringType::None,
        ShoringType::Shored,
        ShoringType::Sloped,
        ShoringType::Benched,
    ];

    /// Get the key string used in saved estimates
    pub fn code(&self) -> &'static str {
        match self {
            ShoringType::None => "none",
            ShoringType::Shored => "shored",
            ShoringType::Sloped => "sloped",
            ShoringType::Benched => "benched",
        }
    }

    /// Install data for this method
    pub fn spec(&self) -> &'static ShoringSpec {
        match self {
            ShoringType::None => &NONE,
            ShoringType::Shored => &SHORED,
            ShoringType::Sloped => &SLOPED,
            ShoringType::Benched => &BENCHED,
        }
    }

    /// Whether this method installs physical panels
    pub fn uses_panels(&self) -> bool {
        matches!(self, ShoringType::Shored)
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_lowercase().as_str() {
            "none" | "no" => Ok(ShoringType::None),
            "shored" | "box" | "shields" => Ok(ShoringType::Shored),
            "sloped" | "slope" => Ok(ShoringType::Sloped),
            "benched" | "bench" => Ok(ShoringType::Benched),
            _ => Err(CalcError::unknown_option("shoring_type", s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        self.spec().label
    }
}

impl std::fmt::Display for ShoringType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl Default for ShoringType {
    fn default() -> Self {
        ShoringType::None
    }
}
