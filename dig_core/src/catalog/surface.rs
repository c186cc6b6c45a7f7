//! Surface Restorations
//!
//! Saw-cut and removal production rates by surface type. Dirt/unpaved
//! carries zero rates; the engine skips those divisions entirely.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Existing surface over the excavation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceType {
    Asphalt,
    Concrete,
    /// Dirt / unpaved - no saw cutting or demolition
    Dirt,
}

/// Production rates and section data for a surface type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceProperties {
    /// Display label
    pub label: &'static str,
    /// Saw-cut production (linear ft per minute); 0 = no cutting required
    pub saw_cut_ft_per_min: f64,
    /// Demolition/removal production (SF per hour); 0 = no removal required
    pub removal_sf_per_hr: f64,
    /// Patch-back cost placeholder ($/SF) - populated by the pricing layer
    pub patch_cost_per_sf: f64,
    /// Typical section thickness (in)
    pub thickness_in: f64,
}

const ASPHALT: SurfaceProperties = SurfaceProperties {
    label: "Asphalt",
    saw_cut_ft_per_min: 3.0,
    removal_sf_per_hr: 200.0,
    patch_cost_per_sf: 0.0,
    thickness_in: 4.0,
};

const CONCRETE: SurfaceProperties = SurfaceProperties {
    label: "Concrete",
    saw_cut_ft_per_min: 1.5,
    removal_sf_per_hr: 100.0,
    patch_cost_per_sf: 0.0,
    thickness_in: 6.0,
};

const DIRT: SurfaceProperties = SurfaceProperties {
    label: "Dirt/Unpaved",
    saw_cut_ft_per_min: 0.0,
    removal_sf_per_hr: 0.0,
    patch_cost_per_sf: 0.0,
    thickness_in: 0.0,
};

impl SurfaceType {
    /// All surface type variants for UI selection
    pub const ALL: [SurfaceType; 3] = [
        SurfaceType::Asphalt,
        SurfaceType::Concrete,
        SurfaceType::Dirt,
    ];

    /// Get the key string used in saved estimates
    pub fn code(&self) -> &'static str {
        match self {
            SurfaceType::Asphalt => "asphalt",
            SurfaceType::Concrete => "concrete",
            SurfaceType::Dirt => "dirt",
        }
    }

    /// Production rates and section data for this surface
    pub fn properties(&self) -> &'static SurfaceProperties {
        match self {
            SurfaceType::Asphalt => &ASPHALT,
            SurfaceType::Concrete => &CONCRETE,
            SurfaceType::Dirt => &DIRT,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_lowercase().as_str() {
            "asphalt" | "ac" | "pavement" => Ok(SurfaceType::Asphalt),
            "concrete" | "pcc" => Ok(SurfaceType::Concrete),
            "dirt" | "unpaved" | "native" => Ok(SurfaceType::Dirt),
            _ => Err(CalcError::unknown_option("surface_type", s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        self.properties().label
    }
}

impl std::fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl Default for SurfaceType {
    fn default() -> Self {
        SurfaceType::Asphalt
    }
}
