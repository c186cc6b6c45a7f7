//! Excavators and Haul Trucks
//!
//! Machine production data. Excavator dig rate is derived in the engine as
//! bucket capacity x fill factor x cycles/hr x job efficiency; trucks carry
//! capacity and per-load loading time for offhaul math.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Excavators
// ============================================================================

/// Excavator size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExcavatorSize {
    /// Mini (Cat 304-308 class)
    Mini,
    /// Small (Cat 311-316 class)
    Small,
    /// Medium (Cat 320-330 class)
    Medium,
    /// Large (Cat 336-352 class)
    Large,
}

/// Production data for an excavator size class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExcavatorSpec {
    /// Display label
    pub label: &'static str,
    /// Heaped bucket capacity (CY)
    pub bucket_cy: f64,
    /// Dig-swing-dump cycles per hour
    pub cycles_per_hr: f64,
    /// Maximum reach (ft)
    pub reach_ft: f64,
}

const MINI: ExcavatorSpec = ExcavatorSpec {
    label: "Mini Excavator (Cat 304-308)",
    bucket_cy: 0.28,
    cycles_per_hr: 120.0,
    reach_ft: 16.0,
};

const SMALL: ExcavatorSpec = ExcavatorSpec {
    label: "Small Excavator (Cat 311-316)",
    bucket_cy: 0.55,
    cycles_per_hr: 100.0,
    reach_ft: 22.0,
};

const MEDIUM: ExcavatorSpec = ExcavatorSpec {
    label: "Medium Excavator (Cat 320-330)",
    bucket_cy: 1.15,
    cycles_per_hr: 90.0,
    reach_ft: 32.0,
};

const LARGE: ExcavatorSpec = ExcavatorSpec {
    label: "Large Excavator (Cat 336-352)",
    bucket_cy: 1.9,
    cycles_per_hr: 80.0,
    reach_ft: 40.0,
};

impl ExcavatorSize {
    /// All excavator sizes for UI selection
    pub const ALL: [ExcavatorSize; 4] = [
        ExcavatorSize::Mini,
        ExcavatorSize::Small,
        ExcavatorSize::Medium,
        ExcavatorSize::Large,
    ];

    /// Get the key string used in saved estimates
    pub fn code(&self) -> &'static str {
        match self {
            ExcavatorSize::Mini => "mini",
            ExcavatorSize::Small => "small",
            ExcavatorSize::Medium => "medium",
            ExcavatorSize::Large => "large",
        }
    }

    /// Production data for this size class
    pub fn spec(&self) -> &'static ExcavatorSpec {
        match self {
            ExcavatorSize::Mini => &MINI,
            ExcavatorSize::Small => &SMALL,
            ExcavatorSize::Medium => &MEDIUM,
            ExcavatorSize::Large => &LARGE,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_lowercase().as_str() {
            "mini" => Ok(ExcavatorSize::Mini),
            "small" => Ok(ExcavatorSize::Small),
            "medium" | "mid" => Ok(ExcavatorSize::Medium),
            "large" => Ok(ExcavatorSize::Large),
            _ => Err(CalcError::unknown_option("excavator_size", s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        self.spec().label
    }
}

impl std::fmt::Display for ExcavatorSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl Default for ExcavatorSize {
    fn default() -> Self {
        ExcavatorSize::Medium
    }
}

// ============================================================================
// Haul Trucks
// ============================================================================

/// Haul truck size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TruckSize {
    /// 10 CY end dump
    #[serde(rename = "10cy")]
    Cy10,
    /// 14 CY end dump
    #[serde(rename = "14cy")]
    Cy14,
    /// 16 CY Super 10
    #[serde(rename = "16cy")]
    Cy16,
    /// 20 CY transfer
    #[serde(rename = "20cy")]
    Cy20,
}

/// Capacity and loading data for a haul truck class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TruckSpec {
    /// Display label
    pub label: &'static str,
    /// Payload capacity (loose CY)
    pub capacity_cy: f64,
    /// Time to load one truck (min)
    pub load_time_min: f64,
}

const CY10: TruckSpec = TruckSpec {
    label: "10 CY End Dump",
    capacity_cy: 10.0,
    load_time_min: 8.0,
};

const CY14: TruckSpec = TruckSpec {
    label: "14 CY End Dump",
    capacity_cy: 14.0,
    load_time_min: 10.0,
};

const CY16: TruckSpec = TruckSpec {
    label: "16 CY Super 10",
    capacity_cy: 16.0,
    load_time_min: 12.0,
};

const CY20: TruckSpec = TruckSpec {
    label: "20 CY Transfer",
    capacity_cy: 20.0,
    load_time_min: 15.0,
};

impl TruckSize {
    /// All truck sizes for UI selection
    pub const ALL: [TruckSize; 4] = [
        TruckSize::Cy10,
        TruckSize::Cy14,
        TruckSize::Cy16,
        TruckSize::Cy20,
    ];

    /// Get the key string used in saved estimates (e.g., "14cy")
    pub fn code(&self) -> &'static str {
        match self {
            TruckSize::Cy10 => "10cy",
            TruckSize::Cy14 => "14cy",
            TruckSize::Cy16 => "16cy",
            TruckSize::Cy20 => "20cy",
        }
    }

    /// Capacity and loading data for this truck class
    pub fn spec(&self) -> &'static TruckSpec {
        match self {
            TruckSize::Cy10 => &CY10,
            TruckSize::Cy14 => &CY14,
            TruckSize::Cy16 => &CY16,
            TruckSize::Cy20 => &CY20,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.to_lowercase().replace(' ', "").as_str() {
            "10cy" | "10" => Ok(TruckSize::Cy10),
            "14cy" | "14" => Ok(TruckSize::Cy14),
            "16cy" | "16" => Ok(TruckSize::Cy16),
            "20cy" | "20" => Ok(TruckSize::Cy20),
            _ => Err(CalcError::unknown_option("truck_size", s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        self.spec().label
    }
}

impl std::fmt::Display for TruckSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl Default for TruckSize {
    fn default() -> Self {
        TruckSize::Cy14
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excavator_lookup() {
        let spec = ExcavatorSize::Medium.spec();
        assert_eq!(spec.bucket_cy, 1.15);
        assert_eq!(spec.cycles_per_hr, 90.0);
    }

    #[test]
    fn test_truck_lookup() {
        let spec = TruckSize::Cy14.spec();
        assert_eq!(spec.capacity_cy, 14.0);
        assert_eq!(spec.load_time_min, 10.0);
    }

    #[test]
    fn test_truck_serialization() {
        let json = serde_json::to_string(&TruckSize::Cy14).unwrap();
        assert_eq!(json, "\"14cy\"");

        let roundtrip: TruckSize = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, TruckSize::Cy14);
    }

    #[test]
    fn test_parsing() {
        assert_eq!(TruckSize::from_str_flexible("20").unwrap(), TruckSize::Cy20);
        assert_eq!(
            ExcavatorSize::from_str_flexible("Mini").unwrap(),
            ExcavatorSize::Mini
        );
        assert!(TruckSize::from_str_flexible("25cy").is_err());
    }
}
